//! Language code mapping between the application and the provider

/// Application codes the provider spells differently
const PROVIDER_CODES: &[(&str, &str)] = &[
    ("zh", "zh-CN"),
    ("zh-YUE", "zh-TW"),
    ("he", "iw"),
    ("jv", "jw"),
];

/// Output code whose romanization is supplied elsewhere
pub const CANTONESE_ROMANIZED: &str = "zh-YUE";

/// Map an application language code to the provider's code.
///
/// Unknown codes pass through unchanged.
pub fn to_provider_code(code: &str) -> &str {
    PROVIDER_CODES
        .iter()
        .find(|(app, _)| *app == code)
        .map(|(_, provider)| *provider)
        .unwrap_or(code)
}

/// Map a language code reported by the provider back to the application's.
pub fn from_provider_code(code: &str) -> &str {
    match code {
        "zh-CN" => "zh",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_are_mapped() {
        assert_eq!(to_provider_code("zh"), "zh-CN");
        assert_eq!(to_provider_code("zh-YUE"), "zh-TW");
        assert_eq!(to_provider_code("he"), "iw");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        assert_eq!(to_provider_code("fr"), "fr");
        assert_eq!(to_provider_code("auto"), "auto");
        assert_eq!(to_provider_code("x-klingon"), "x-klingon");
    }

    #[test]
    fn test_simplified_chinese_is_generic_chinese() {
        assert_eq!(from_provider_code("zh-CN"), "zh");
        assert_eq!(from_provider_code("zh-TW"), "zh-TW");
        assert_eq!(from_provider_code("en"), "en");
    }
}
