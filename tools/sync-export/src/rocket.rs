//! Rocket XML reader
//!
//! Reads the `.rocket` documents saved by the Rocket sync editor:
//!
//! ```xml
//! <rocket rows="10000">
//!   <tracks>
//!     <track name="camera:fov">
//!       <key row="0" value="60" interpolation="1"/>
//!       <key row="128" value="45" interpolation="0"/>
//!     </track>
//!   </tracks>
//! </rocket>
//! ```
//!
//! Every `track` element anywhere in the document is a track, and every child
//! element of a track is a keyframe whatever its tag.

use std::num::IntErrorKind;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use sync_track::{Track, TrackError};

/// Load all tracks from a Rocket XML file
pub fn load_rocket(path: &Path) -> Result<Vec<Track>, TrackError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TrackError::filesystem("read", path, e))?;
    parse_rocket(&content, &path.display().to_string())
}

/// Parse all tracks from Rocket XML text
///
/// `origin` labels the input in error messages.
pub fn parse_rocket(xml: &str, origin: &str) -> Result<Vec<Track>, TrackError> {
    // Editors and hand-written files may carry a <!DOCTYPE>
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| TrackError::parse(origin, e.to_string()))?;

    doc.descendants()
        .filter(|node| node.has_tag_name("track"))
        .map(|node| parse_track(node, origin))
        .collect()
}

fn parse_track(node: Node<'_, '_>, origin: &str) -> Result<Track, TrackError> {
    let name = required_attribute(node, "name", origin)?;
    let mut track = Track::new(name);

    for key in node.children().filter(Node::is_element) {
        let row = parse_int(required_attribute(key, "row", origin)?, "row", &track, origin)?;
        let value = parse_float(required_attribute(key, "value", origin)?, origin)?;
        let interpolation = parse_int(
            required_attribute(key, "interpolation", origin)?,
            "interpolation",
            &track,
            origin,
        )?;
        track.push_raw(row, value, interpolation)?;
    }

    tracing::debug!("Parsed track '{}' ({} keys)", track.name(), track.len());
    Ok(track)
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    attribute: &str,
    origin: &str,
) -> Result<&'a str, TrackError> {
    node.attribute(attribute).ok_or_else(|| {
        let pos = node.document().text_pos_at(node.range().start);
        TrackError::parse(
            origin,
            format!(
                "<{}> at {} is missing attribute '{}'",
                node.tag_name().name(),
                pos,
                attribute
            ),
        )
    })
}

fn parse_int(text: &str, field: &'static str, track: &Track, origin: &str) -> Result<i64, TrackError> {
    let text = text.trim();
    text.parse::<i64>().map_err(|e| match e.kind() {
        // A number, just one that no target width can hold
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => TrackError::Encoding {
            track: track.name().to_string(),
            field,
            value: text.to_string(),
            width: if field == "row" { "u32" } else { "i8" },
        },
        _ => TrackError::parse(
            origin,
            format!("track '{}': {} '{}' is not an integer", track.name(), field, text),
        ),
    })
}

fn parse_float(text: &str, origin: &str) -> Result<f64, TrackError> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| TrackError::parse(origin, format!("value '{}' is not a number", text)))
}
