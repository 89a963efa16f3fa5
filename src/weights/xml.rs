/// Persisted weight sets
///
/// ```xml
/// <WeightSet Name="Warrior.fury">
///   <Strength>1</Strength>
///   <HitRating>0.8</HitRating>
/// </WeightSet>
/// ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::stats::{Stat, WeightSet};
use crate::utils::string::{format_float_invariant, parse_float_invariant};

const ROOT_ELEMENT: &str = "WeightSet";
const NAME_ATTRIBUTE: &str = "Name";
const DEFAULT_SET_NAME: &str = "Current";

#[derive(Debug, Error)]
pub enum WeightSetError {
    #[error("failed to access weight set file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed weight set XML: {0}")]
    Malformed(String),

    #[error("weight set XML has no root element")]
    MissingRoot,

    #[error("failed to write weight set XML: {0}")]
    Write(String),
}

fn malformed(e: impl std::fmt::Display) -> WeightSetError {
    WeightSetError::Malformed(e.to_string())
}

fn write_failed(e: impl std::fmt::Display) -> WeightSetError {
    WeightSetError::Write(e.to_string())
}

pub fn load_weight_set(path: &Path) -> Result<WeightSet, WeightSetError> {
    let text = fs::read_to_string(path)?;
    let set = parse_weight_set(&text)?;
    info!("Loaded weight set {} from {:?}", set.name(), path);
    Ok(set)
}

pub fn save_weight_set(set: &WeightSet, path: &Path) -> Result<(), WeightSetError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, weight_set_to_xml(set)?)?;
    info!("Saved weight set {} to {:?}", set.name(), path);
    Ok(())
}

/// Parse a weight set document. Bad stat entries are logged and skipped;
/// only a broken document is an error.
pub fn parse_weight_set(text: &str) -> Result<WeightSet, WeightSetError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut name: Option<String> = None;
    let mut weights: Vec<(Stat, f32)> = Vec::new();
    let mut seen: HashSet<Stat> = HashSet::new();
    let mut depth = 0usize;
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(element) => {
                depth += 1;
                if depth == 1 {
                    name = Some(root_name(&element)?);
                } else if depth == 2 {
                    current = Some((element_name(&element), String::new()));
                }
            }
            Event::Empty(element) => {
                if depth == 0 {
                    name = Some(root_name(&element)?);
                    break;
                }
                if depth == 1 {
                    let set_name = name.as_deref().unwrap_or(DEFAULT_SET_NAME);
                    add_weight(set_name, &element_name(&element), "", &mut weights, &mut seen);
                }
            }
            Event::Text(text) => {
                if let Some((_, value)) = current.as_mut() {
                    if depth == 2 {
                        value.push_str(&text.unescape().map_err(malformed)?);
                    }
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((stat_name, value)) = current.take() {
                        let set_name = name.as_deref().unwrap_or(DEFAULT_SET_NAME);
                        add_weight(set_name, &stat_name, &value, &mut weights, &mut seen);
                    }
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(WeightSetError::Malformed("unexpected end of document".into()));
                }
                break;
            }
            _ => {}
        }
    }

    let name = name.ok_or(WeightSetError::MissingRoot)?;
    Ok(WeightSet::new(name, weights))
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn root_name(element: &BytesStart<'_>) -> Result<String, WeightSetError> {
    let tag = element_name(element);
    if tag != ROOT_ELEMENT {
        warn!("Unexpected weight set root element <{}>", tag);
    }
    for attribute in element.attributes() {
        let attribute = attribute.map_err(malformed)?;
        if attribute.key.as_ref() == NAME_ATTRIBUTE.as_bytes() {
            let value = attribute.unescape_value().map_err(malformed)?;
            return Ok(value.into_owned());
        }
    }
    Ok(DEFAULT_SET_NAME.to_string())
}

fn add_weight(
    set_name: &str,
    stat_name: &str,
    value: &str,
    weights: &mut Vec<(Stat, f32)>,
    seen: &mut HashSet<Stat>,
) {
    let Some(stat) = Stat::from_name(stat_name).filter(|s| s.is_scored()) else {
        warn!("Unknown stat {} in weight set {}, skipping", stat_name, set_name);
        return;
    };
    let Some(weight) = parse_float_invariant(value) else {
        warn!(
            "Invalid value '{}' for {} in weight set {}, skipping",
            value, stat_name, set_name
        );
        return;
    };
    if !seen.insert(stat) {
        warn!("Weight set {} contains duplicate stat {}", set_name, stat_name);
        return;
    }
    weights.push((stat, weight));
}

pub fn weight_set_to_xml(set: &WeightSet) -> Result<String, WeightSetError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_failed)?;
    writer
        .write_event(Event::Start(
            BytesStart::new(ROOT_ELEMENT).with_attributes([(NAME_ATTRIBUTE, set.name())]),
        ))
        .map_err(write_failed)?;

    for (stat, weight) in set.weights() {
        let value = format_float_invariant(weight);
        writer
            .write_event(Event::Start(BytesStart::new(stat.name())))
            .map_err(write_failed)?;
        writer
            .write_event(Event::Text(BytesText::new(&value)))
            .map_err(write_failed)?;
        writer
            .write_event(Event::End(BytesEnd::new(stat.name())))
            .map_err(write_failed)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
        .map_err(write_failed)?;

    String::from_utf8(writer.into_inner()).map_err(write_failed)
}
