use serde::Serialize;

/// Industry contexts offered by the home screen selector, in display order.
pub const INDUSTRIES: [&str; 4] = ["文旅", "教育", "汽车", "地产"];

/// Output shape requested from the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Video,
    Image,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Video => "video",
            Mode::Image => "image",
        }
    }

    pub fn all() -> Vec<Mode> {
        vec![Mode::Video, Mode::Image]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Video => "未来短片",
            Mode::Image => "沉浸海报",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_tokens_match_wire_values() {
        assert_eq!(Mode::Video.as_str(), "video");
        assert_eq!(Mode::Image.as_str(), "image");
        assert_eq!(serde_json::to_string(&Mode::Video).unwrap(), "\"video\"");
        assert_eq!(serde_json::to_string(&Mode::Image).unwrap(), "\"image\"");
    }

    #[test]
    fn mode_display_names() {
        assert_eq!(Mode::Video.display_name(), "未来短片");
        assert_eq!(Mode::Image.display_name(), "沉浸海报");
    }

    #[test]
    fn tables_are_fixed_size() {
        assert_eq!(INDUSTRIES.len(), 4);
        assert_eq!(Mode::all().len(), 2);
    }
}
