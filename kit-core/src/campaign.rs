//! Campaign input: the fields a user fills in on the campaign form.

use serde::{Deserialize, Serialize};

macro_rules! define_output_formats {
    ($( $variant:ident, $field:ident, $key:literal => $label:literal; )+) => {
        /// A deliverable format the poster can be reworked into.
        ///
        /// Variants are declared in the order the form lists them; that order is
        /// also the order in which requested formats are embedded in prompts.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum OutputFormat {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl OutputFormat {
            /// All formats in declaration order.
            pub const ALL: &'static [OutputFormat] = &[$(OutputFormat::$variant),+];

            /// The form toggle key, e.g. `instagramPost`.
            pub fn key(self) -> &'static str {
                match self {
                    $(OutputFormat::$variant => $key,)+
                }
            }

            /// The human-readable label embedded in prompts and used as the asset title.
            pub fn label(self) -> &'static str {
                match self {
                    $(OutputFormat::$variant => $label,)+
                }
            }

            /// Look a format up by its toggle key.
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(OutputFormat::$variant),)+
                    _ => None,
                }
            }
        }

        /// Which output formats were ticked on the form.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct FormatSelections {
            $(
                #[serde(rename = $key)]
                pub $field: bool,
            )+
        }

        impl FormatSelections {
            pub fn is_selected(&self, format: OutputFormat) -> bool {
                match format {
                    $(OutputFormat::$variant => self.$field,)+
                }
            }

            pub fn set(&mut self, format: OutputFormat, selected: bool) {
                match format {
                    $(OutputFormat::$variant => self.$field = selected,)+
                }
            }
        }
    };
}

define_output_formats! {
    InstagramPost, instagram_post, "instagramPost" => "Instagram Post (1080x1080px)";
    InstagramStory, instagram_story, "instagramStory" => "Instagram Story (1080x1920px)";
    FacebookAd, facebook_ad, "facebookAd" => "Facebook Ad Banner (1200x628px)";
    LinkedInBanner, linked_in_banner, "linkedInBanner" => "LinkedIn Banner (1584x396px)";
    TwitterHeader, twitter_header, "twitterHeader" => "Twitter/X Post Header (1600x900px)";
    YoutubeThumbnail, youtube_thumbnail, "youtubeThumbnail" => "YouTube Thumbnail (1280x720px)";
    WebsiteHero, website_hero, "websiteHero" => "Website Hero Banner (1920x1080px)";
    FlyerA5, flyer_a5, "flyerA5" => "Printed Flyer A5 (148x210mm)";
    PosterA3, poster_a3, "posterA3" => "Printed Poster A3 (297x420mm)";
    Postcard, postcard, "postcard" => "Postcard (4x6 inches)";
    BusinessCard, business_card, "businessCard" => "Business Card (3.5x2 inches)";
    WhatsappShare, whatsapp_share, "whatsappShare" => "WhatsApp/Telegram Share Image (800x800px)";
}

impl FormatSelections {
    /// Selected formats in declaration order.
    pub fn requested(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL.iter().copied().filter(|f| self.is_selected(*f)).collect()
    }

    pub fn any(&self) -> bool {
        OutputFormat::ALL.iter().any(|f| self.is_selected(*f))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user described about the campaign.
///
/// String fields mirror the form inputs verbatim; helpers below apply the
/// trimming and filtering rules the prompt builder relies on. Format toggles and
/// feature toggles are independent of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignSpec {
    pub business_type: String,
    pub image_description: String,
    pub business_name: String,
    pub offer: String,
    pub colors: String,
    pub call_to_action: String,
    pub width: String,
    pub height: String,
    pub seasonal_adaptation: String,
    pub mockup_requests: String,
    pub format_selections: FormatSelections,
    pub generate_customer_ad: bool,
    #[serde(rename = "generate3dRender")]
    pub generate_3d_render: bool,
    pub neon_glow_mode: bool,
    pub target_languages: String,
    pub generate_qr_code: bool,
    pub qr_code_url: String,
}

impl CampaignSpec {
    /// Seasonal theme as it should appear in prompts; empty or `none` becomes `None`.
    pub fn seasonal_theme(&self) -> &str {
        let theme = self.seasonal_adaptation.as_str();
        if theme.is_empty() || theme.eq_ignore_ascii_case("none") { "None" } else { theme }
    }

    /// Explicit output size, only when both dimensions are present and numeric.
    pub fn custom_size(&self) -> Option<(&str, &str)> {
        let width = self.width.trim();
        let height = self.height.trim();
        if is_numeric(width) && is_numeric(height) { Some((width, height)) } else { None }
    }

    /// Mockup ideas after comma split, trim, and dropping empty entries.
    pub fn mockup_ideas(&self) -> Vec<&str> {
        split_list(&self.mockup_requests)
    }

    /// Target languages after comma split, trim, and dropping empty entries.
    pub fn languages(&self) -> Vec<&str> {
        split_list(&self.target_languages)
    }

    pub fn requested_formats(&self) -> Vec<OutputFormat> {
        self.format_selections.requested()
    }

    /// QR destination, present only when the QR toggle is on and the URL is non-blank.
    pub fn qr_destination(&self) -> Option<&str> {
        let url = self.qr_code_url.trim();
        (self.generate_qr_code && !url.is_empty()).then_some(url)
    }
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_the_fixed_table() {
        assert_eq!(OutputFormat::InstagramPost.label(), "Instagram Post (1080x1080px)");
        assert_eq!(OutputFormat::LinkedInBanner.key(), "linkedInBanner");
        assert_eq!(OutputFormat::ALL.len(), 12);
        assert_eq!(OutputFormat::from_key("whatsappShare"), Some(OutputFormat::WhatsappShare));
        assert_eq!(OutputFormat::from_key("tiktok"), None);
    }

    #[test]
    fn requested_formats_keep_declaration_order() {
        let mut selections = FormatSelections::default();
        selections.set(OutputFormat::Postcard, true);
        selections.set(OutputFormat::InstagramStory, true);
        selections.set(OutputFormat::FacebookAd, true);

        assert_eq!(
            selections.requested(),
            vec![OutputFormat::InstagramStory, OutputFormat::FacebookAd, OutputFormat::Postcard]
        );
        assert!(selections.any());
        assert!(!FormatSelections::default().any());
    }

    #[test]
    fn deserializes_form_payload() {
        let spec: CampaignSpec = serde_json::from_value(serde_json::json!({
            "businessName": "Acme",
            "offer": "50% off",
            "callToAction": "Visit us",
            "formatSelections": { "instagramPost": true, "flyerA5": true },
            "generate3dRender": true,
            "targetLanguages": "Spanish, French"
        }))
        .unwrap();

        assert_eq!(spec.business_name, "Acme");
        assert!(spec.format_selections.instagram_post);
        assert!(spec.format_selections.flyer_a5);
        assert!(spec.generate_3d_render);
        assert!(!spec.generate_qr_code);
        assert_eq!(spec.languages(), vec!["Spanish", "French"]);
    }

    #[test]
    fn list_fields_drop_blank_entries() {
        let spec = CampaignSpec {
            mockup_requests: " billboard ,, , coffee mug,".into(),
            target_languages: " , ".into(),
            ..Default::default()
        };
        assert_eq!(spec.mockup_ideas(), vec!["billboard", "coffee mug"]);
        assert!(spec.languages().is_empty());
    }

    #[test]
    fn seasonal_theme_defaults_to_none() {
        let mut spec = CampaignSpec::default();
        assert_eq!(spec.seasonal_theme(), "None");
        spec.seasonal_adaptation = "NONE".into();
        assert_eq!(spec.seasonal_theme(), "None");
        spec.seasonal_adaptation = "Christmas".into();
        assert_eq!(spec.seasonal_theme(), "Christmas");
    }

    #[test]
    fn custom_size_requires_both_numeric_dimensions() {
        let mut spec = CampaignSpec { width: "1080".into(), ..Default::default() };
        assert_eq!(spec.custom_size(), None);
        spec.height = "abc".into();
        assert_eq!(spec.custom_size(), None);
        spec.height = "1920".into();
        assert_eq!(spec.custom_size(), Some(("1080", "1920")));
    }

    #[test]
    fn qr_destination_needs_toggle_and_url() {
        let mut spec =
            CampaignSpec { qr_code_url: "https://acme.test".into(), ..Default::default() };
        assert_eq!(spec.qr_destination(), None);
        spec.generate_qr_code = true;
        assert_eq!(spec.qr_destination(), Some("https://acme.test"));
        spec.qr_code_url = "   ".into();
        assert_eq!(spec.qr_destination(), None);
    }
}
