/// Light/dark site theme, applied as a `data-theme` attribute on `<html>`.
///
/// Deliberately session-only: the difficulty preference is the single value
/// this app persists, so the theme seeds from the system color scheme on
/// every load instead of from storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub(crate) const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        use Theme::*;
        match self {
            Light => Dark,
            Dark => Light,
        }
    }

    /// System preference via `prefers-color-scheme`; light when the media
    /// query is unavailable.
    pub(crate) fn detect() -> Self {
        use gloo::utils::window;
        match window().match_media("(prefers-color-scheme: dark)") {
            Ok(Some(query)) if query.matches() => Self::Dark,
            _ => Self::Light,
        }
    }

    pub(crate) fn apply(self) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        log::debug!("theme-scheme: {}", self.scheme());
        if let Err(err) = html.set_attribute(Self::ATTR_NAME, self.scheme()) {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    /// Detects and applies the startup theme.
    pub(crate) fn init() -> Self {
        let theme = Self::detect();
        theme.apply();
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates_between_schemes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn schemes_match_the_data_theme_values() {
        assert_eq!(Theme::Light.scheme(), "light");
        assert_eq!(Theme::Dark.scheme(), "dark");
        assert_eq!(Theme::ATTR_NAME, "data-theme");
    }
}
