//! Homepage feature list
//!
//! The three feature descriptors are fixed at compile time and rendered into
//! a three-column row.

use std::fmt::{self, Write};

use crate::escape::{escape_html, escape_html_text};

/// One homepage feature card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub title: &'static str,
    /// Inline HTML fragment, inserted as is
    pub description: &'static str,
    /// Image path relative to the site root
    pub icon: Option<&'static str>,
}

/// The homepage features, in display order
pub const FEATURES: [FeatureDescriptor; 3] = [
    FeatureDescriptor {
        title: "Easy to Use",
        description: "Each of the modules in dToolkit was made to be very easy to use by new and \
                      experienced developers alike!",
        icon: None,
    },
    FeatureDescriptor {
        title: "No Setup",
        description: "Just plop dToolkit into your experience, and you're all set!",
        icon: None,
    },
    FeatureDescriptor {
        title: "Typechecking Galore",
        description: "dToolkit has typechecking for all of its classes, and every library also \
                      implements typechecking to be as easy to implement into your projects!",
        icon: None,
    },
];

/// Render the feature row.
///
/// Each descriptor gets one `col col--4` column, in input order.
pub fn render_features(features: &[FeatureDescriptor]) -> String {
    FeatureList(features).to_string()
}

struct FeatureList<'a>(&'a [FeatureDescriptor]);

impl fmt::Display for FeatureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<section class=\"features\">")?;
        writeln!(f, "  <div class=\"container\">")?;
        writeln!(f, "    <div class=\"row\">")?;
        for feature in self.0 {
            write_feature(f, feature)?;
        }
        writeln!(f, "    </div>")?;
        writeln!(f, "  </div>")?;
        writeln!(f, "</section>")
    }
}

fn write_feature(out: &mut impl Write, feature: &FeatureDescriptor) -> fmt::Result {
    writeln!(out, "      <div class=\"col col--4\">")?;
    writeln!(out, "        <div class=\"text--center\">")?;
    if let Some(icon) = feature.icon {
        writeln!(
            out,
            "          <img class=\"featurePng\" src=\"{}\" alt=\"{}\">",
            escape_html(icon),
            escape_html(feature.title)
        )?;
    }
    writeln!(out, "        </div>")?;
    writeln!(out, "        <div class=\"padding-horiz--md\">")?;
    writeln!(
        out,
        "          <h3 class=\"text--center\">{}</h3>",
        escape_html_text(feature.title)
    )?;
    writeln!(out, "          <p>{}</p>", feature.description)?;
    writeln!(out, "        </div>")?;
    writeln!(out, "      </div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_columns_in_order() {
        let html = render_features(&FEATURES);
        assert_eq!(html.matches("<div class=\"col col--4\">").count(), 3);

        let easy = html.find("Easy to Use").unwrap();
        let setup = html.find("No Setup").unwrap();
        let typecheck = html.find("Typechecking Galore").unwrap();
        assert!(easy < setup && setup < typecheck);
    }

    #[test]
    fn test_text_is_verbatim() {
        let html = render_features(&FEATURES);
        for feature in &FEATURES {
            assert!(html.contains(&format!("<h3 class=\"text--center\">{}</h3>", feature.title)));
            assert!(html.contains(&format!("<p>{}</p>", feature.description)));
        }
        assert!(html.contains("you're all set!"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_features(&FEATURES), render_features(&FEATURES));
    }

    #[test]
    fn test_icon() {
        let features = [FeatureDescriptor {
            title: "Fast",
            description: "Quick.",
            icon: Some("img/fast.png"),
        }];
        let html = render_features(&features);
        assert!(html.contains("<img class=\"featurePng\" src=\"img/fast.png\" alt=\"Fast\">"));
        assert!(!render_features(&FEATURES).contains("<img"));
    }

    #[test]
    fn test_empty_list() {
        let html = render_features(&[]);
        assert!(html.contains("<div class=\"row\">"));
        assert!(!html.contains("col--4"));
    }
}
