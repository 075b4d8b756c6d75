use std::{
    fs::File,
    io::{self, BufRead, BufReader, Lines},
    num::ParseIntError,
    path::Path,
};

use miette::GraphicalReportHandler;
use nom::{
    character::complete::{digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11
pub type Span<'a> = LocatedSpan<&'a str>;

/// A line that failed to parse, with enough context to draw a pointer at the
/// offending byte.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input: {kind}")]
pub struct BadInput {
    #[source_code]
    src: String,
    #[label("{kind}")]
    bad_bit: miette::SourceSpan,
    kind: String,
}

impl BadInput {
    fn from_tree(src: &str, tree: &ErrorTree<Span>) -> Self {
        let (offset, kind) = locate(tree).unwrap_or_else(|| (0, "unparseable".to_string()));

        Self {
            src: src.to_string(),
            bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
            kind,
        }
    }

    pub fn line(&self) -> &str {
        &self.src
    }

    pub fn offset(&self) -> usize {
        self.bad_bit.offset()
    }

    /// Graphical report for the terminal.
    pub fn render(&self) -> String {
        let mut s = String::new();
        match GraphicalReportHandler::new().render_report(&mut s, self) {
            Ok(()) => s,
            Err(_) => self.to_string(),
        }
    }
}

fn locate(tree: &ErrorTree<Span>) -> Option<(usize, String)> {
    match tree {
        GenericErrorTree::Base { location, kind } => {
            Some((location.location_offset(), kind.to_string()))
        }
        GenericErrorTree::Stack { base, .. } => locate(base),
        GenericErrorTree::Alt(alts) => alts.iter().find_map(locate),
    }
}

pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(recognize(tuple((opt(one_of("+-")), digit1))), |i: Span<'a>| {
        i.fragment().parse::<i64>()
    })(i)
}

/// Parses a whole line as a single integer. Trailing garbage is an error.
pub fn parse_integer_line(line: &str) -> Result<i64, BadInput> {
    let parsed: Result<i64, ErrorTree<Span>> =
        final_parser(parse_number::<ErrorTree<Span>>)(Span::new(line));

    parsed.map_err(|e| BadInput::from_tree(line, &e))
}

/// Lazily reads `path` line by line. The file is closed once the iterator is
/// dropped.
pub fn read_lines(path: impl AsRef<Path>) -> io::Result<Lines<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file).lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("0", 0)]
    #[case("1000", 1000)]
    #[case("007", 7)]
    #[case("-42", -42)]
    #[case("+5", 5)]
    #[case("9223372036854775807", i64::MAX)]
    fn parses_integers(#[case] line: &str, #[case] expected: i64) {
        let res = parse_integer_line(line);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[rstest]
    #[case("abc", 0)]
    #[case("12x", 2)]
    #[case(" 12", 0)]
    #[case("12 ", 2)]
    #[case("-", 1)]
    #[case("+", 1)]
    #[case("+-5", 1)]
    fn rejects_non_integers(#[case] line: &str, #[case] offset: usize) {
        let err = parse_integer_line(line).unwrap_err();
        assert_eq!(err.line(), line);
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_integer_line("9223372036854775808").is_err());
    }

    #[test]
    fn renders_report() {
        let err = parse_integer_line("abc").unwrap_err();
        assert!(err.render().contains("bad input"));
    }

    #[test]
    fn reads_lines_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\r\n2\n\n3").unwrap();

        let lines = read_lines(file.path())
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(lines, vec!["1", "2", "", "3"]);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lines(dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
