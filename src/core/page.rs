//! Server-side rendering of the single marketing page.

use crate::config::toml_config::SiteContentConfig;
use crate::domain::model::{Alert, ConsultationRequest, Testimonial};
use crate::utils::error::Result;
use askama::Template;

pub const NO_TESTIMONIALS: &str = "No testimonials yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Treatment {
    pub title: String,
    pub text: String,
}

/// The static copy of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContent {
    pub brand: String,
    pub tagline: String,
    pub about: String,
    pub treatments: Vec<Treatment>,
    /// Footer line; derived from `brand` when unset.
    pub copyright: Option<String>,
}

impl Default for SiteContent {
    fn default() -> Self {
        let treatment = |title: &str, text: &str| Treatment {
            title: title.to_string(),
            text: text.to_string(),
        };
        Self {
            brand: "Staten Island TMJ".to_string(),
            tagline: "Your journey to a pain-free life starts here.".to_string(),
            about: "We are dedicated to providing the highest quality of care for patients \
                    suffering from TMJ disorders. Our team is led by Dr. John Doe, a renowned \
                    specialist in the field."
                .to_string(),
            treatments: vec![
                treatment(
                    "Diagnosis",
                    "We use the latest technology to accurately diagnose your TMJ condition.",
                ),
                treatment(
                    "Non-Surgical Treatments",
                    "A variety of non-surgical options are available to relieve your pain.",
                ),
                treatment(
                    "Surgical Treatments",
                    "For severe cases, we offer advanced surgical solutions.",
                ),
            ],
            copyright: None,
        }
    }
}

impl SiteContent {
    pub fn apply(&mut self, overrides: SiteContentConfig) {
        if let Some(brand) = overrides.brand {
            self.brand = brand;
        }
        if let Some(tagline) = overrides.tagline {
            self.tagline = tagline;
        }
        if let Some(about) = overrides.about {
            self.about = about;
        }
        if let Some(copyright) = overrides.copyright {
            self.copyright = Some(copyright);
        }
    }

    pub fn copyright(&self) -> String {
        match &self.copyright {
            Some(line) => line.clone(),
            None => format!("\u{a9} 2025 {}. All Rights Reserved.", self.brand),
        }
    }
}

/// Everything that varies between two renders of the page.
pub struct PageView<'a> {
    pub content: &'a SiteContent,
    pub testimonials: &'a [Testimonial],
    pub form: &'a ConsultationRequest,
    pub alert: Option<&'a Alert>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    content: &'a SiteContent,
    testimonials: &'a [Testimonial],
    form: &'a ConsultationRequest,
    placeholder: &'static str,
    copyright: String,
    alert_script: Option<String>,
}

// A JSON string is a valid JS literal; `</` is split so it cannot close the script tag.
fn script_string(input: &str) -> String {
    serde_json::Value::String(input.to_string())
        .to_string()
        .replace("</", "<\\/")
}

pub fn render(view: &PageView<'_>) -> Result<String> {
    let template = IndexTemplate {
        content: view.content,
        testimonials: view.testimonials,
        form: view.form,
        placeholder: NO_TESTIMONIALS,
        copyright: view.content.copyright(),
        alert_script: view.alert.map(|alert| script_string(&alert.text())),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testimonial(id: i64, name: &str, quote: &str) -> Testimonial {
        Testimonial {
            id,
            name: name.to_string(),
            quote: quote.to_string(),
            created_at: None,
        }
    }

    fn render_with(
        testimonials: &[Testimonial],
        form: &ConsultationRequest,
        alert: Option<&Alert>,
    ) -> String {
        let content = SiteContent::default();
        render(&PageView {
            content: &content,
            testimonials,
            form,
            alert,
        })
        .unwrap()
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let form = ConsultationRequest::default();
        for count in 0..4 {
            let list: Vec<Testimonial> = (0..count)
                .map(|i| testimonial(i, &format!("Patient {i}"), "Thank you"))
                .collect();
            let html = render_with(&list, &form, None);

            assert_eq!(html.matches("<blockquote").count(), count as usize);
            assert_eq!(html.contains(NO_TESTIMONIALS), count == 0);
        }
    }

    #[test]
    fn test_sections_and_form_inputs_present() {
        let html = render_with(&[], &ConsultationRequest::default(), None);

        for id in ["home", "about", "treatments", "testimonials", "contact"] {
            assert!(html.contains(&format!("<section id=\"{id}\"")), "missing {id}");
        }
        for name in ["name", "email", "phone", "message"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
        assert!(html.contains("Non-Surgical Treatments"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_form_values_and_testimonials_are_escaped() {
        let form = ConsultationRequest {
            name: "\"><script>x".to_string(),
            message: "<textarea>".to_string(),
            ..Default::default()
        };
        let list = [testimonial(1, "Tom & Jerry", "<b>best")];
        let html = render_with(&list, &form, None);

        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("&lt;b&gt;best"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;x\""));
        assert!(html.contains("&lt;textarea&gt;</textarea>"));
        assert!(!html.contains("<b>best"));
    }

    #[test]
    fn test_rows_with_empty_columns_are_still_listed() {
        let list = [
            testimonial(1, "Ann", ""),
            testimonial(2, "", "Great"),
            testimonial(3, "", ""),
        ];
        let html = render_with(&list, &ConsultationRequest::default(), None);

        assert_eq!(html.matches("<blockquote").count(), 3);
        assert!(!html.contains(NO_TESTIMONIALS));
    }

    #[test]
    fn test_alert_is_rendered_as_script() {
        let alert = Alert::SubmitFailed("bad </script> \"input\"".to_string());
        let html = render_with(&[], &ConsultationRequest::default(), Some(&alert));

        assert!(html.contains(
            r#"<script>window.alert("Error submitting form: bad <\/script> \"input\"");</script>"#
        ));
    }

    #[test]
    fn test_content_overrides_apply() {
        let mut content = SiteContent::default();
        content.apply(SiteContentConfig {
            tagline: Some("Smile again".to_string()),
            ..Default::default()
        });
        assert_eq!(content.tagline, "Smile again");
        assert_eq!(content.brand, "Staten Island TMJ");
        assert_eq!(
            content.copyright(),
            "\u{a9} 2025 Staten Island TMJ. All Rights Reserved."
        );
    }

    #[test]
    fn test_footer_follows_brand_unless_set() {
        let mut content = SiteContent::default();
        content.apply(SiteContentConfig {
            brand: Some("Jaw Clinic".to_string()),
            ..Default::default()
        });
        assert_eq!(content.copyright(), "\u{a9} 2025 Jaw Clinic. All Rights Reserved.");

        let html = render(&PageView {
            content: &content,
            testimonials: &[],
            form: &ConsultationRequest::default(),
            alert: None,
        })
        .unwrap();
        assert!(html.contains("2025 Jaw Clinic. All Rights Reserved."));
        assert!(!html.contains("Staten Island TMJ"));

        content.apply(SiteContentConfig {
            copyright: Some("Jaw Clinic LLC".to_string()),
            ..Default::default()
        });
        assert_eq!(content.copyright(), "Jaw Clinic LLC");
    }
}
