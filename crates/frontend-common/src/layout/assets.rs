//! Asset bundles for each layout

/// Client-side widget a layout initializes once its scripts are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    /// Animate-on-scroll
    AnimateOnScroll,
    Carousel,
    /// Open and close buttons for the collapsed navigation menu
    MobileMenu,
}

/// Stylesheets, scripts and widgets a layout needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutAssets {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub widgets: Vec<Widget>,
}

fn owned(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|url| (*url).to_string()).collect()
}

impl LayoutAssets {
    pub fn new(stylesheets: &[&str], scripts: &[&str], widgets: &[Widget]) -> Self {
        Self {
            stylesheets: owned(stylesheets),
            scripts: owned(scripts),
            widgets: widgets.to_vec(),
        }
    }

    /// Public site
    pub fn main() -> Self {
        Self::new(
            &[
                "assets/css/bootstrap.min.css",
                "assets/plugins/fontawesome/css/fontawesome.min.css",
                "assets/plugins/fontawesome/css/all.min.css",
                "assets/css/owl.carousel.min.css",
                "assets/css/aos.css",
                "assets/css/style.css",
            ],
            &[
                "assets/js/jquery-3.7.1.min.js",
                "assets/js/bootstrap.bundle.min.js",
                "assets/js/owl.carousel.min.js",
                "assets/js/aos.js",
                "assets/js/script.js",
            ],
            &[Widget::AnimateOnScroll, Widget::Carousel, Widget::MobileMenu],
        )
    }

    /// Admin dashboard
    pub fn admin() -> Self {
        Self::new(
            &[
                "assets/admin/assets/css/bootstrap.min.css",
                "assets/admin/assets/plugins/fontawesome/css/fontawesome.min.css",
                "assets/admin/assets/plugins/fontawesome/css/all.min.css",
                "assets/admin/assets/css/feathericon.min.css",
                "assets/admin/assets/plugins/morris/morris.css",
                "assets/admin/assets/css/custom.css",
            ],
            &[
                "assets/admin/assets/js/jquery-3.7.1.min.js",
                "assets/admin/assets/js/bootstrap.bundle.min.js",
                "assets/admin/assets/plugins/slimscroll/jquery.slimscroll.min.js",
                "assets/admin/assets/plugins/raphael/raphael.min.js",
                "assets/admin/assets/plugins/morris/morris.min.js",
                "assets/admin/assets/js/chart.morris.js",
                "assets/admin/assets/js/script.js",
            ],
            &[],
        )
    }

    /// Patient area; shares the public site's look
    pub fn patient() -> Self {
        Self::new(
            &[
                "assets/css/bootstrap.min.css",
                "assets/plugins/fontawesome/css/fontawesome.min.css",
                "assets/plugins/fontawesome/css/all.min.css",
                "assets/css/style.css",
            ],
            &[
                "assets/js/jquery-3.7.1.min.js",
                "assets/js/bootstrap.bundle.min.js",
                "assets/js/script.js",
            ],
            &[Widget::MobileMenu],
        )
    }

    /// Login and registration pages
    pub fn auth() -> Self {
        Self::new(
            &["assets/css/bootstrap.min.css", "assets/css/style.css"],
            &["assets/js/jquery-3.7.1.min.js", "assets/js/bootstrap.bundle.min.js"],
            &[],
        )
    }

    /// Preset for a layout name
    pub fn for_layout(name: &str) -> Option<Self> {
        match name {
            "main" => Some(Self::main()),
            "admin" => Some(Self::admin()),
            "patient" => Some(Self::patient()),
            "auth" => Some(Self::auth()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        for name in ["main", "admin", "patient", "auth"] {
            let assets = LayoutAssets::for_layout(name).unwrap();
            assert!(!assets.stylesheets.is_empty(), "{name} has no stylesheets");
            assert!(!assets.scripts.is_empty(), "{name} has no scripts");
        }
        assert!(LayoutAssets::for_layout("unknown").is_none());

        // jQuery plugins need jQuery first
        let admin = LayoutAssets::admin();
        assert!(admin.scripts[0].contains("jquery-3.7.1"));
        assert!(LayoutAssets::main().widgets.contains(&Widget::Carousel));
    }
}
