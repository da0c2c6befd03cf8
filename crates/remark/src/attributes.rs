//! Presentation attribute micro-syntax shared by the figure and image passes.
//!
//! Image references carry attributes in their fragment:
//! `./img/x.webp#w=80&align=left&border=2px_solid_red`. Figure directives
//! carry the same keys in their `{...}` attribute block.

use glossmark_core::Attributes;

/// Border applied when `border` is given without a value.
pub const DEFAULT_BORDER: &str = "5px solid #ADADAD";

/// Width requested by `width` (raw CSS length) or `w` (percent of container).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Width {
    /// Raw length from `width`, emitted verbatim.
    Length(String),
    /// Number from `w`, emitted as `<n>%`.
    Percent(String),
}

impl Width {
    /// Resolves `width`, then `w`. Empty values and non-numeric `w` are ignored.
    pub fn from_attributes(attrs: &Attributes) -> Option<Self> {
        if let Some(width) = attrs.get("width").filter(|v| !v.trim().is_empty()) {
            return Some(Width::Length(width.trim().to_string()));
        }
        attrs
            .get("w")
            .map(|w| w.trim())
            .filter(|w| is_number(w))
            .map(|w| Width::Percent(w.to_string()))
    }

    /// CSS value for the `width` property.
    pub fn css(&self) -> String {
        match self {
            Width::Length(length) => length.clone(),
            Width::Percent(percent) => format!("{percent}%"),
        }
    }
}

/// Horizontal placement of an image inside its wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    /// Parses `left`, `center` or `right`; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Decodes an attribute value: underscores stand for spaces.
pub fn decode_value(value: &str) -> String {
    value.replace('_', " ")
}

/// Resolves a `border` attribute: present and empty means `default_border`.
pub fn border_from(attrs: &Attributes, default_border: &str) -> Option<String> {
    attrs.get("border").map(|value| {
        if value.is_empty() {
            default_border.to_string()
        } else {
            decode_value(value)
        }
    })
}

/// Splits an image reference at the first `#` into `(url, fragment)`.
pub fn split_reference(reference: &str) -> Option<(&str, &str)> {
    reference.split_once('#')
}

/// Parses an image fragment such as `w=80&border&align=left`.
///
/// `key=value` parts decode underscores in the value; a bare `border` maps to
/// `default_border`. Empty parts, empty keys and other bare flags are dropped.
/// Later keys overwrite earlier ones.
pub fn parse_fragment(fragment: &str, default_border: &str) -> Attributes {
    let mut attrs = Attributes::new();
    for part in fragment.split('&') {
        match part.split_once('=') {
            Some(("", _)) => log::debug!("Skipping fragment part with empty key: {part:?}"),
            Some((key, value)) => {
                attrs.insert(key.to_string(), decode_value(value));
            }
            None if part == "border" => {
                attrs.insert("border".to_string(), default_border.to_string());
            }
            None => {}
        }
    }
    attrs
}

fn is_number(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn fragment_with_width_and_bare_border() {
        let parsed = parse_fragment("w=80&border", DEFAULT_BORDER);
        assert_eq!(parsed, attrs(&[("w", "80"), ("border", "5px solid #ADADAD")]));
    }

    #[test]
    fn fragment_drops_unknown_flags_and_empty_parts() {
        let parsed = parse_fragment("foo&w=50&&=x&", DEFAULT_BORDER);
        assert_eq!(parsed, attrs(&[("w", "50")]));
    }

    #[test]
    fn fragment_decodes_underscores_and_keeps_later_equals() {
        let parsed = parse_fragment("border=2px_solid_red&title=a=b", DEFAULT_BORDER);
        assert_eq!(parsed.get("border").map(String::as_str), Some("2px solid red"));
        assert_eq!(parsed.get("title").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn fragment_last_write_wins() {
        let parsed = parse_fragment("w=10&w=20", DEFAULT_BORDER);
        assert_eq!(parsed.get("w").map(String::as_str), Some("20"));
    }

    #[test]
    fn width_prefers_raw_length() {
        let width = Width::from_attributes(&attrs(&[("w", "50"), ("width", "300px")]));
        assert_eq!(width, Some(Width::Length("300px".into())));
        assert_eq!(width.unwrap().css(), "300px");
    }

    #[test]
    fn percent_width_requires_number() {
        assert_eq!(
            Width::from_attributes(&attrs(&[("w", "62.5")])).map(|w| w.css()),
            Some("62.5%".to_string())
        );
        assert_eq!(Width::from_attributes(&attrs(&[("w", "wide")])), None);
        assert_eq!(Width::from_attributes(&attrs(&[("w", "")])), None);
        assert_eq!(Width::from_attributes(&attrs(&[("width", "")])), None);
    }

    #[test]
    fn border_default_and_decoded() {
        assert_eq!(
            border_from(&attrs(&[("border", "")]), DEFAULT_BORDER).as_deref(),
            Some(DEFAULT_BORDER)
        );
        assert_eq!(
            border_from(&attrs(&[("border", "1px_dashed_blue")]), DEFAULT_BORDER).as_deref(),
            Some("1px dashed blue")
        );
        assert_eq!(border_from(&Attributes::new(), DEFAULT_BORDER), None);
    }

    #[test]
    fn alignment_parsing() {
        assert_eq!(Alignment::parse("left"), Some(Alignment::Left));
        assert_eq!(Alignment::parse("right"), Some(Alignment::Right));
        assert_eq!(Alignment::parse("middle"), None);
        assert_eq!(Alignment::default().as_str(), "center");
    }

    #[test]
    fn split_reference_at_first_hash() {
        assert_eq!(split_reference("./img/x.webp#w=80#x"), Some(("./img/x.webp", "w=80#x")));
        assert_eq!(split_reference("./img/x.webp"), None);
    }
}
