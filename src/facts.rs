/*
Implements:
 - a reader for Prolog-like fact bases declaring colors and maps:
     cor(red).
     mapa(nordeste, [area(paraiba, PB, [RN, PE, CE]), ...]).
 - other clauses (rules, directives) are skipped up to their final '.'
*/
use std::fs;

use nom::{IResult, error::{Error, ErrorKind}};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while1, is_not};
use nom::character::complete::{char, multispace1};
use nom::combinator::{cut, map, opt, recognize, value};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, tuple};

use crate::error::{MapColoringError, Result};
use crate::source::{KnowledgeSource, RawArea, RawMap};


/** knowledge source reading a Prolog-like fact base */
#[derive(Debug, Clone, Default)]
pub struct FactsSource {
    /// colors (cor/1 facts) in file order
    colors: Vec<String>,
    /// maps (mapa/2 facts) in file order
    maps: Vec<RawMap>,
}

impl KnowledgeSource for FactsSource {
    fn load_colors(&self) -> Result<Vec<String>> { Ok(self.colors.clone()) }

    fn load_maps(&self) -> Result<Vec<RawMap>> { Ok(self.maps.clone()) }
}

impl FactsSource {
    /// reads a fact base file
    pub fn from_file(filename:&str) -> Result<Self> {
        let content = fs::read_to_string(filename)
            .map_err(|source| MapColoringError::Io { path: filename.to_string(), source })?
            .replace("\r", "");
        Self::parse(&content)
    }

    /// reads a fact base from its text
    pub fn parse(content:&str) -> Result<Self> {
        let (colors, maps) = read_facts(content)?;
        Ok(Self { colors, maps })
    }
}


/** top-level clause of a fact base */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// cor(Id).
    Color(String),
    /// mapa(Id, [area(..), ..]).
    Map(RawMap),
    /// any other clause (skipped)
    Other,
}

/// reads every clause of a fact base, returns (colors, maps)
pub fn read_facts(content:&str) -> Result<(Vec<String>, Vec<RawMap>)> {
    let mut colors = Vec::new();
    let mut maps = Vec::new();
    let mut s = content;
    loop {
        let (remaining, _) = skip_blanks(s).map_err(|e| parse_error(content, e))?;
        if remaining.is_empty() { break; }
        let (remaining, c) = read_clause(remaining).map_err(|e| parse_error(content, e))?;
        match c {
            Clause::Color(c) => colors.push(c),
            Clause::Map(m) => maps.push(m),
            Clause::Other => {},
        }
        s = remaining;
    }
    Ok((colors, maps))
}

/// converts a nom error into a parse error located by its line
fn parse_error(content:&str, e:nom::Err<Error<&str>>) -> MapColoringError {
    match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let offset = content.len() - e.input.len();
            let near:String = e.input.chars().take(20).collect();
            MapColoringError::Parse {
                line: content[..offset].matches('\n').count() + 1,
                message: format!("unexpected input near {:?}", near),
            }
        },
        nom::Err::Incomplete(_) => MapColoringError::Parse {
            line: content.lines().count(),
            message: "incomplete input".to_string(),
        },
    }
}

/// skips a '%' comment
fn line_comment(s:&str) -> IResult<&str, &str> {
    recognize(pair(char('%'), opt(is_not("\n"))))(s)
}

/// skips a '/* */' comment
fn block_comment(s:&str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(s)
}

/// skips blanks and comments
pub fn skip_blanks(s:&str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment))))(s)
}

/// reads a fixed token, after blanks
fn token<'a>(t:&'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(skip_blanks, tag(t))
}

/// reads an atom, a variable or a quoted atom (quotes removed)
pub fn identifier(s:&str) -> IResult<&str, &str> {
    preceded(
        skip_blanks,
        alt((
            delimited(char('\''), is_not("'"), char('\'')),
            take_while1(|c:char| c.is_alphanumeric() || c == '_'),
        ))
    )(s)
}

/// reads a list of identifiers: [A, B, ...]
fn identifier_list(s:&str) -> IResult<&str, Vec<&str>> {
    delimited(token("["), separated_list0(token(","), identifier), token("]"))(s)
}

/// reads area(Name, Code, [Adj, ...])
pub fn read_area(s:&str) -> IResult<&str, RawArea> {
    map(
        tuple((
            token("area"), cut(token("(")),
            cut(identifier), cut(token(",")),
            cut(identifier), cut(token(",")),
            cut(identifier_list), cut(token(")")),
        )),
        |(_, _, name, _, code, _, adjacent, _)| RawArea {
            name: name.to_string(),
            label: None,
            code: code.to_string(),
            adjacent: adjacent.into_iter().map(str::to_string).collect(),
        }
    )(s)
}

/// reads cor(Id). (a rule with a cor/1 head is left to skip_clause)
fn read_color(s:&str) -> IResult<&str, Clause> {
    map(
        preceded(
            pair(token("cor"), token("(")),
            tuple((identifier, token(")"), token("."))),
        ),
        |(c, _, _)| Clause::Color(c.to_string())
    )(s)
}

/// reads mapa(Id, [area(..), ...]). Fails hard once the area list is opened.
fn read_map(s:&str) -> IResult<&str, Clause> {
    map(
        tuple((
            token("mapa"), token("("), identifier, token(","), token("["),
            cut(tuple((
                separated_list0(token(","), read_area),
                token("]"),
                token(")"),
                token("."),
            ))),
        )),
        |(_, _, id, _, _, (areas, _, _, _))| Clause::Map(RawMap { id: id.to_string(), areas })
    )(s)
}

/// skips a clause that is neither a color nor a map (up to a '.' followed by a blank)
fn skip_clause(s:&str) -> IResult<&str, Clause> {
    let mut quote:Option<char> = None;
    let mut in_comment = false;
    for (i,c) in s.char_indices() {
        if in_comment {
            if c == '\n' { in_comment = false; }
            continue;
        }
        match quote {
            Some(q) => if c == q { quote = None },
            None => match c {
                '\'' | '"' => quote = Some(c),
                '%' => in_comment = true,
                '.' => {
                    let end = i + c.len_utf8();
                    let next = s[end..].chars().next();
                    if next.map_or(true, |n| n.is_whitespace() || n == '%') {
                        return Ok((&s[end..], Clause::Other));
                    }
                },
                _ => {},
            },
        }
    }
    Err(nom::Err::Error(Error::new(s, ErrorKind::TakeUntil)))
}

/// reads one clause
pub fn read_clause(s:&str) -> IResult<&str, Clause> {
    alt((read_color, read_map, skip_clause))(s)
}
