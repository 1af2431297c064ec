use crate::error::{Result, ScorerError};
use crate::model::Arrow;
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, value},
    multi::separated_list1,
    sequence::delimited,
    IResult, Parser,
};

/// Parse one arrow: X, M, or a ring value from 0 to 10
fn arrow_value(input: &str) -> IResult<&str, Arrow> {
    alt((
        value(Arrow::X, tag_no_case("x")),
        value(Arrow::MISS, tag_no_case("m")),
        map_res(digit1, |digits: &str| {
            digits
                .parse::<u8>()
                .ok()
                .and_then(|score| Arrow::ring(score).ok())
                .ok_or("ring value out of range")
        }),
    ))
    .parse(input)
}

/// Arrows are separated by a comma (with optional spaces) or by whitespace
fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(space0, char(','), space0)),
        value((), space1),
    ))
    .parse(input)
}

fn arrow_list(input: &str) -> IResult<&str, Vec<Arrow>> {
    delimited(space0, separated_list1(separator, arrow_value), space0).parse(input)
}

/// Parse a typed arrow sequence such as `"X, 10, 9 M"`
pub fn parse_arrows(input: &str) -> Result<Vec<Arrow>> {
    all_consuming(arrow_list)
        .parse(input.trim())
        .map(|(_, arrows)| arrows)
        .map_err(|_| ScorerError::Parse(format!("invalid arrow list: {:?}", input)))
}

/// Read one end per line, skipping blank lines and `#` comments
pub fn read_ends(content: &str) -> Result<Vec<Vec<Arrow>>> {
    let mut ends = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        ends.push(parse_arrows(line)?);
    }

    Ok(ends)
}

/// All arrows of a score sheet in shooting order
pub fn read_arrows(content: &str) -> Result<Vec<Arrow>> {
    Ok(read_ends(content)?.into_iter().flatten().collect())
}

pub fn read_arrows_file(path: &std::path::Path) -> Result<Vec<Arrow>> {
    let content = std::fs::read_to_string(path)?;
    read_arrows(&content)
}
