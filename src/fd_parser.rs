use tracing::{debug, warn};
use winnow::combinator::separated;
use winnow::prelude::*;
use winnow::token::{rest, take_till, take_until};

use crate::error::{Error, ParseError};
use crate::fd_ast::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// The first bad line rejects the whole batch.
    #[default]
    Strict,
    /// Bad lines are logged and skipped.
    Lenient,
}

/// Parses newline-delimited `A, B -> C, D` lines against the declared universe.
///
/// Blank lines are ignored. In [`ParseMode::Strict`] the first malformed line
/// or unknown attribute aborts the parse; in [`ParseMode::Lenient`] such lines
/// are dropped and the rest are returned.
pub fn parse_dependencies(
    universe: &AttributeSet,
    text: &str,
    mode: ParseMode,
) -> Result<Vec<FunctionalDependency>, ParseError> {
    let mut deps = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_dependency(universe, line) {
            Ok(fd) => deps.push(fd),
            Err(e) if mode == ParseMode::Lenient => {
                warn!(line, error = %e, "skipping dependency line");
            }
            Err(e) => return Err(e),
        }
    }
    debug!(count = deps.len(), ?mode, "parsed dependencies");
    Ok(deps)
}

/// Parses a single non-blank dependency line.
pub fn parse_dependency(
    universe: &AttributeSet,
    line: &str,
) -> Result<FunctionalDependency, ParseError> {
    let malformed = || ParseError::MalformedLine(line.to_string());

    let (left, right) = arrow_split.parse(line).map_err(|_| malformed())?;
    if right.contains("->") {
        return Err(malformed());
    }
    let left = side(left).ok_or_else(malformed)?;
    let right = side(right).ok_or_else(malformed)?;

    for name in left.iter().chain(right.iter()) {
        if !universe.contains(name) {
            return Err(ParseError::UnknownAttribute(name.to_string()));
        }
    }

    Ok(FunctionalDependency::new(left, right))
}

/// Comma-delimited names, trimmed, empty items dropped.
pub fn parse_attribute_list(text: &str) -> AttributeSet {
    text.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

/// Attribute universe from the header row of CSV text.
pub fn parse_csv_header(text: &str) -> Result<AttributeSet, Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let header = reader.headers()?;
    Ok(header
        .iter()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .collect())
}

fn arrow_split<'s>(input: &mut &'s str) -> winnow::Result<(&'s str, &'s str)> {
    let left = take_until(0.., "->").parse_next(input)?;
    "->".parse_next(input)?;
    let right = rest.parse_next(input)?;
    Ok((left, right))
}

fn side_items<'s>(input: &mut &'s str) -> winnow::Result<Vec<&'s str>> {
    separated(1.., take_till(1.., ','), ',').parse_next(input)
}

fn side(text: &str) -> Option<AttributeSet> {
    let items = side_items.parse(text).ok()?;
    let mut set = AttributeSet::new();
    for item in items {
        let name = item.trim();
        if name.is_empty() {
            return None;
        }
        set.insert(name);
    }
    Some(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(names: &[&str]) -> AttributeSet {
        names.iter().copied().collect()
    }

    fn names(set: &AttributeSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn arrow_split_basic() {
        let mut input = "A, B -> C";
        let (left, right) = arrow_split(&mut input).unwrap();
        assert_eq!(left, "A, B ");
        assert_eq!(right, " C");
        assert_eq!(input, "");
    }

    #[test]
    fn side_items_rejects_trailing_comma() {
        assert!(side_items.parse("A,").is_err());
        assert!(side_items.parse(",A").is_err());
        assert_eq!(side_items.parse("A, B").unwrap(), vec!["A", " B"]);
    }

    #[test]
    fn parse_single_dependency() {
        let u = universe(&["StudentID", "CourseID", "Grade"]);
        let fd = parse_dependency(&u, "StudentID, CourseID -> Grade").unwrap();
        assert_eq!(names(&fd.determinant), vec!["StudentID", "CourseID"]);
        assert_eq!(names(&fd.dependent), vec!["Grade"]);
    }

    #[test]
    fn parse_without_spaces() {
        let u = universe(&["A", "B", "C"]);
        let fd = parse_dependency(&u, "A->B,C").unwrap();
        assert_eq!(names(&fd.dependent), vec!["B", "C"]);
    }

    #[test]
    fn attribute_names_may_contain_spaces() {
        let u = universe(&["Student ID", "Student Name"]);
        let fd = parse_dependency(&u, "Student ID -> Student Name").unwrap();
        assert_eq!(names(&fd.determinant), vec!["Student ID"]);
    }

    #[test]
    fn missing_arrow_is_malformed() {
        let u = universe(&["X", "Y"]);
        assert_eq!(
            parse_dependency(&u, "X Y"),
            Err(ParseError::MalformedLine("X Y".into()))
        );
    }

    #[test]
    fn empty_side_is_malformed() {
        let u = universe(&["A", "B"]);
        assert!(matches!(parse_dependency(&u, "-> B"), Err(ParseError::MalformedLine(_))));
        assert!(matches!(parse_dependency(&u, "A ->"), Err(ParseError::MalformedLine(_))));
        assert!(matches!(parse_dependency(&u, "A, -> B"), Err(ParseError::MalformedLine(_))));
        assert!(matches!(parse_dependency(&u, "A,  , B -> B"), Err(ParseError::MalformedLine(_))));
    }

    #[test]
    fn second_arrow_is_malformed() {
        let u = universe(&["A", "B", "C"]);
        assert!(matches!(
            parse_dependency(&u, "A -> B -> C"),
            Err(ParseError::MalformedLine(_))
        ));
    }

    #[test]
    fn unknown_attribute_is_named() {
        let u = universe(&["W"]);
        assert_eq!(
            parse_dependency(&u, "Z -> W"),
            Err(ParseError::UnknownAttribute("Z".into()))
        );
        assert_eq!(
            parse_dependency(&u, "W -> Q"),
            Err(ParseError::UnknownAttribute("Q".into()))
        );
    }

    #[test]
    fn attribute_match_is_case_sensitive() {
        let u = universe(&["a", "b"]);
        assert_eq!(
            parse_dependency(&u, "A -> b"),
            Err(ParseError::UnknownAttribute("A".into()))
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let u = universe(&["A", "B", "C"]);
        let deps = parse_dependencies(&u, "\nA -> B\n   \r\nB -> C\n", ParseMode::Strict).unwrap();
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn strict_mode_aborts_on_first_error() {
        let u = universe(&["A", "B"]);
        let err = parse_dependencies(&u, "A -> B\nnonsense\nZ -> A", ParseMode::Strict).unwrap_err();
        assert_eq!(err, ParseError::MalformedLine("nonsense".into()));
    }

    #[test]
    fn lenient_mode_keeps_valid_lines() {
        let u = universe(&["A", "B"]);
        let deps = parse_dependencies(&u, "A -> B\nnonsense\nZ -> A\nB -> A", ParseMode::Lenient).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[1].to_string(), "B -> A");
    }

    #[test]
    fn attribute_list_trims_and_drops_empty() {
        let set = parse_attribute_list(" StudentID ,CourseID,, ");
        assert_eq!(names(&set), vec!["StudentID", "CourseID"]);
        assert!(parse_attribute_list("").is_empty());
    }

    #[test]
    fn csv_header_strips_quotes() {
        let set = parse_csv_header("\"patient_id\", visit_date,\"diagnosis\"\n1,2024-01-01,flu\n").unwrap();
        assert_eq!(names(&set), vec!["patient_id", "visit_date", "diagnosis"]);
    }

    #[test]
    fn csv_header_keeps_comma_inside_quotes() {
        let set = parse_csv_header("\"name, full\",id\n\"Doe, J\",1\n").unwrap();
        assert_eq!(names(&set), vec!["name, full", "id"]);
    }

    #[test]
    fn csv_header_unescapes_doubled_quotes() {
        let set = parse_csv_header("\"say \"\"hi\"\"\",b\n1,2\n").unwrap();
        assert_eq!(names(&set), vec!["say \"hi\"", "b"]);
    }

    #[test]
    fn csv_header_with_bom_and_crlf() {
        let set = parse_csv_header("\u{feff}a,b\r\n1,2\r\n").unwrap();
        assert_eq!(names(&set), vec!["a", "b"]);
    }

    #[test]
    fn csv_header_of_empty_text() {
        assert!(parse_csv_header("").unwrap().is_empty());
    }
}
