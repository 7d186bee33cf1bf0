//! Ability-line parser.
//!
//! Each comma-separated token is resolved to its tag by the longest known
//! code prefix, and the remainder is parsed according to the tag's payload
//! shape. Any failure discards the whole line.
//!
//! Arc lines add a facing label and four damage vectors in front of the
//! ability list; [`parse_arc_line`] reads those and hands the rest to
//! [`parse_abilities`].

use winnow::ascii::{dec_int, dec_uint, digit1};
use winnow::combinator::{delimited, opt, preceded, separated};
use winnow::error::{ContextError, ErrMode};
use winnow::token::take_while;
use winnow::Parser;

use super::ARC_CLASSES;
use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue, ArcSummary, PayloadShape};
use crate::convert::Facing;
use crate::damage::{damage_bands, damage_value, DamageVector, WResult};
use crate::error::{ConversionError, Result};
use crate::movement::{MovementMode, MovementProfile};

fn door_suffix(input: &mut &str) -> WResult<Option<u32>> {
    opt(preceded('D', dec_uint)).parse_next(input)
}

fn artillery_count(input: &mut &str) -> WResult<i64> {
    preceded('-', dec_uint).map(|n: u32| i64::from(n)).parse_next(input)
}

fn count(input: &mut &str) -> WResult<i64> {
    dec_int.parse_next(input)
}

fn real(input: &mut &str) -> WResult<f64> {
    (digit1, opt(('.', digit1)))
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

fn special_vector(input: &mut &str) -> WResult<DamageVector> {
    damage_bands
        .map(|values| DamageVector::from_values(&values, values.len(), false))
        .parse_next(input)
}

fn movement_entry(input: &mut &str) -> WResult<(MovementMode, u32)> {
    (
        dec_uint,
        opt('"'),
        take_while(0.., |c: char| c.is_ascii_lowercase()),
    )
        .verify_map(|(value, inches, code): (u32, Option<char>, &str)| {
            let mode = MovementMode::from_code(code)?;
            (mode.is_thrust() == inches.is_none()).then_some((mode, value))
        })
        .parse_next(input)
}

fn movement_map(input: &mut &str) -> WResult<MovementProfile> {
    delimited('(', separated(1.., movement_entry, '/'), ')')
        .map(|entries: Vec<(MovementMode, u32)>| {
            entries
                .into_iter()
                .fold(MovementProfile::new(), |profile, (mode, value)| profile.with(mode, value))
        })
        .parse_next(input)
}

/// Run `parser` over all of `input`.
fn complete<'a, O>(
    token: &str,
    mut input: &'a str,
    mut parser: impl Parser<&'a str, O, ErrMode<ContextError>>,
    expected: &str,
) -> Result<O> {
    let value = parser
        .parse_next(&mut input)
        .map_err(|_| ConversionError::malformed(token, format!("expected {expected}")))?;
    if input.is_empty() {
        Ok(value)
    } else {
        Err(ConversionError::malformed(
            token,
            format!("unexpected trailing text '{input}'"),
        ))
    }
}

/// Split on commas outside parentheses.
fn split_top_level(text: &str) -> Result<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ConversionError::malformed(text, "unbalanced ')'"))?;
            }
            ',' if depth == 0 => {
                tokens.push(text[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ConversionError::malformed(text, "unclosed '('"));
    }
    tokens.push(text[start..].trim());
    Ok(tokens)
}

fn number_value(x: f64) -> AbilityValue {
    if x.fract() == 0.0 {
        AbilityValue::Int(x as i64)
    } else {
        AbilityValue::Real(x)
    }
}

fn parse_turret(token: &str, rest: &str) -> Result<ArcSummary> {
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| ConversionError::malformed(token, "expected '(...)' after TUR"))?;
    let parts = split_top_level(inner)?;
    let (first, abilities) = parts
        .split_first()
        .ok_or_else(|| ConversionError::malformed(token, "empty turret"))?;
    let mut turret = ArcSummary::new(complete(token, first, special_vector, "turret damage")?);
    *turret.abilities_mut() = parse_tokens(abilities)?;
    Ok(turret)
}

fn parse_token(token: &str, catalog: &mut AbilityCatalog) -> Result<()> {
    let tag = AbilityTag::longest_prefix(token)
        .filter(|tag| !tag.is_door_count())
        .ok_or_else(|| ConversionError::malformed(token, "unknown ability"))?;
    let rest = &token[tag.code().len()..];

    match tag.shape() {
        PayloadShape::None => {
            complete(token, rest, "", "no value")?;
            catalog.set(tag)?;
        }
        PayloadShape::Int if tag.is_artillery() => {
            let n = complete(token, rest, artillery_count, "'-' and a count")?;
            catalog.replace(tag, AbilityValue::Int(n))?;
        }
        PayloadShape::Int => {
            let (n, doors) = complete(token, rest, (count, door_suffix), "a count")?;
            catalog.replace(tag, AbilityValue::Int(n))?;
            set_doors(token, tag, doors, catalog)?;
        }
        PayloadShape::Real => {
            let (x, doors) = complete(token, rest, (real, door_suffix), "a number")?;
            catalog.replace(tag, number_value(x))?;
            set_doors(token, tag, doors, catalog)?;
        }
        PayloadShape::Damage => {
            let value = complete(token, rest, damage_value, "a damage value")?;
            catalog.replace(tag, AbilityValue::Damage(value))?;
        }
        PayloadShape::Vector => {
            let vector = complete(token, rest, special_vector, "1-4 damage values")?;
            catalog.replace(tag, AbilityValue::Vector(vector))?;
        }
        PayloadShape::Map => {
            let movement = complete(token, rest, movement_map, "a movement map")?;
            catalog.replace(tag, AbilityValue::Map(movement))?;
        }
        PayloadShape::Arc => {
            let turret = parse_turret(token, rest)?;
            catalog.replace(tag, AbilityValue::Arc(Box::new(turret)))?;
        }
    }
    Ok(())
}

fn set_doors(
    token: &str,
    tag: AbilityTag,
    doors: Option<u32>,
    catalog: &mut AbilityCatalog,
) -> Result<()> {
    let Some(doors) = doors else {
        return Ok(());
    };
    let door_tag = tag
        .doors()
        .ok_or_else(|| ConversionError::malformed(token, format!("{tag} has no doors")))?;
    catalog.replace(door_tag, AbilityValue::Int(i64::from(doors)))?;
    Ok(())
}

fn parse_tokens(tokens: &[&str]) -> Result<AbilityCatalog> {
    let mut catalog = AbilityCatalog::new();
    for token in tokens {
        if token.is_empty() {
            return Err(ConversionError::malformed(*token, "empty ability"));
        }
        parse_token(token, &mut catalog)?;
    }
    Ok(catalog)
}

/// Parse an ability line back into a catalog.
///
/// A blank line is an empty catalog. Any unknown tag or malformed value
/// fails with [`ConversionError::MalformedExportText`] naming the token.
pub fn parse_abilities(line: &str) -> Result<AbilityCatalog> {
    if line.trim().is_empty() {
        return Ok(AbilityCatalog::new());
    }
    parse_tokens(&split_top_level(line)?)
}

fn arc_vector(field: &str, code: &str, standard: bool) -> Result<DamageVector> {
    let rest = field
        .strip_prefix(code)
        .ok_or_else(|| ConversionError::malformed(field, format!("expected {code} damage")))?;
    let values = complete(field, rest, damage_bands, "1-4 damage values")?;
    Ok(DamageVector::from_values(&values, values.len(), standard))
}

/// Parse one arc line: facing, `STD`, `CAP`, `SCAP` and `MSL` vectors and
/// the arc's abilities, separated by tabs.
///
/// Damage classes that print as all dashes are left out of the catalog.
pub fn parse_arc_line(line: &str) -> Result<(Facing, ArcSummary)> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [label, standard, classes @ .., abilities] = fields.as_slice() else {
        return Err(ConversionError::malformed(line, "expected an arc label and damage"));
    };
    if classes.len() != ARC_CLASSES.len() {
        return Err(ConversionError::malformed(
            line,
            format!("expected {} tab-separated fields", ARC_CLASSES.len() + 3),
        ));
    }
    let facing = Facing::from_label(label)
        .ok_or_else(|| ConversionError::malformed(*label, "unknown arc"))?;

    let mut arc = ArcSummary::new(arc_vector(standard, "STD", true)?);
    *arc.abilities_mut() = parse_abilities(abilities)?;
    for (tag, field) in ARC_CLASSES.into_iter().zip(classes) {
        let vector = arc_vector(field, tag.code(), false)?;
        if vector.has_damage() {
            arc.abilities_mut().replace(tag, AbilityValue::Vector(vector))?;
        }
    }
    Ok((facing, arc))
}
