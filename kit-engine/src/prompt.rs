//! # Prompt Builder
//!
//! Pure functions turning a [`CampaignSpec`] into the instruction text for each
//! generation stage. A builder returns `None` when its stage does not apply to
//! the campaign; the orchestrator skips that stage without a network call.
//!
//! Every plan also records which images travel with the prompt
//! ([`InputImage`]), whether the reply is expected to interleave titles
//! ([`ResponseShape`]), and how many images were asked for.

use kit_core::CampaignSpec;
use std::fmt;

pub const POSTER_VARIANTS: usize = 3;
pub const CUSTOMER_AD_VARIANTS: usize = 2;
pub const RENDER_VARIANTS: usize = 2;

/// Title given to the QR code image when the model does not supply one.
pub const QR_DEFAULT_TITLE: &str = "QR Code";

const NEON_CLAUSE: &str = "Apply a special effect: dramatic neon lighting, glowing text, and a \
high-contrast, vibrant style suitable for a nightlife promotion (e.g., bar, club, lounge).";

const DEFAULT_SOURCE_COLORS: &str = "vibrant and appealing colors";

/// The seven generation stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Poster,
    FormatBatch,
    MockupBatch,
    CustomerAd,
    Multilingual,
    Render,
    QrCode,
}

impl PromptKind {
    pub const ALL: [PromptKind; 7] = [
        PromptKind::Poster,
        PromptKind::FormatBatch,
        PromptKind::MockupBatch,
        PromptKind::CustomerAd,
        PromptKind::Multilingual,
        PromptKind::Render,
        PromptKind::QrCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PromptKind::Poster => "poster",
            PromptKind::FormatBatch => "format-batch",
            PromptKind::MockupBatch => "mockup-batch",
            PromptKind::CustomerAd => "customer-ad",
            PromptKind::Multilingual => "multilingual",
            PromptKind::Render => "render",
            PromptKind::QrCode => "qr-code",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the model is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Images only; no text parts requested.
    ImageOnly,
    /// Images, each preceded by a text part carrying its title.
    TitledImages,
}

/// An image attached to a stage request, resolved by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputImage {
    /// The uploaded or synthesized source photo.
    Source,
    /// The first poster produced by the poster stage.
    FirstPoster,
    /// The customer's selfie.
    Selfie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptPlan {
    pub kind: PromptKind,
    pub text: String,
    pub response: ResponseShape,
    pub expected_images: usize,
    /// Images sent ahead of the text, in this order.
    pub inputs: Vec<InputImage>,
    /// Title applied to an image that arrives without a preceding text part.
    pub default_title: Option<&'static str>,
}

impl PromptPlan {
    fn new(
        kind: PromptKind,
        text: String,
        response: ResponseShape,
        expected_images: usize,
    ) -> Self {
        Self { kind, text, response, expected_images, inputs: Vec::new(), default_title: None }
    }

    fn with_inputs(mut self, inputs: &[InputImage]) -> Self {
        self.inputs = inputs.to_vec();
        self
    }

    fn with_default_title(mut self, title: &'static str) -> Self {
        self.default_title = Some(title);
        self
    }
}

/// Build the plan for `kind`, or `None` when the stage is skipped.
pub fn build(kind: PromptKind, spec: &CampaignSpec, has_selfie: bool) -> Option<PromptPlan> {
    match kind {
        PromptKind::Poster => Some(poster(spec)),
        PromptKind::FormatBatch => format_batch(spec),
        PromptKind::MockupBatch => mockup_batch(spec),
        PromptKind::CustomerAd => customer_ad(spec, has_selfie),
        PromptKind::Multilingual => multilingual(spec),
        PromptKind::Render => render(spec),
        PromptKind::QrCode => qr_code(spec),
    }
}

/// All applicable plans in stage order. The poster plan is always first.
pub fn plan_all(spec: &CampaignSpec, has_selfie: bool) -> Vec<PromptPlan> {
    PromptKind::ALL.iter().filter_map(|kind| build(*kind, spec, has_selfie)).collect()
}

pub fn poster(spec: &CampaignSpec) -> PromptPlan {
    let mut specials = Vec::new();
    if spec.neon_glow_mode {
        specials.push(NEON_CLAUSE.to_string());
    }
    if let Some((width, height)) = spec.custom_size() {
        specials.push(format!(
            "The output resolution for these posters must be exactly {width}px by {height}px."
        ));
    }
    if specials.is_empty() {
        specials.push("None".to_string());
    }
    let specials =
        specials.iter().map(|s| format!("    *   {s}")).collect::<Vec<_>>().join("\n");

    let name = &spec.business_name;
    let text = format!(
        "You are a professional marketing designer creating a full campaign kit.\n\
         Your goal is to generate **{POSTER_VARIANTS} distinct, high-quality poster variations** \
         by adding text and enhancements directly onto the provided image.\n\
         \n\
         **Instructions:**\n\
         1.  **Core Task:** Overlay text onto the image to create a seamless, single-image \
         advertisement. Return {POSTER_VARIANTS} separate, complete image variations in the response.\n\
         2.  **Image Enhancement:** Subtly enhance the lighting, colors, and sharpness of the \
         original photo to make it stand out.\n\
         3.  **Branding:** Create and subtly place a minimal, elegant logo-style watermark for \"{name}\".\n\
         4.  **Content to Add:**\n\
         \x20   *   Business Name: \"{name}\"\n\
         \x20   *   Offer: \"{offer}\" (This should be the most prominent text).\n\
         \x20   *   Call to Action: \"{cta}\"\n\
         5.  **Styling:**\n\
         \x20   *   Business Type Context: {business_type}\n\
         \x20   *   Color Palette: Inspired by {colors}\n\
         \x20   *   Seasonal Theme: {theme}\n\
         6.  **Special Instructions:**\n\
         {specials}\n\
         7.  **Output:** Provide exactly {POSTER_VARIANTS} final, edited images as separate parts \
         in your response. Do not add descriptive text.",
        offer = spec.offer,
        cta = spec.call_to_action,
        business_type = spec.business_type,
        colors = spec.colors,
        theme = spec.seasonal_theme(),
    );

    PromptPlan::new(PromptKind::Poster, text, ResponseShape::ImageOnly, POSTER_VARIANTS)
        .with_inputs(&[InputImage::Source])
}

pub fn format_batch(spec: &CampaignSpec) -> Option<PromptPlan> {
    let formats = spec.requested_formats();
    if formats.is_empty() {
        return None;
    }
    let list = formats
        .iter()
        .enumerate()
        .map(|(i, format)| format!("{}. Title: {}", i + 1, format.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "You are a professional graphic designer. Your task is to reformat the provided poster \
         design for various digital and print channels.\n\
         Ensure that the layouts adapt naturally to each size while keeping the business name, \
         offer, and call-to-action clearly visible. Maintain consistency in style, branding, and \
         readability across all formats.\n\
         \n\
         Generate a separate, complete image for each of the following {count} formats. For each \
         image, provide its corresponding title as a text part immediately before the image part.\n\
         \n\
         {list}",
        count = formats.len(),
    );

    Some(
        PromptPlan::new(PromptKind::FormatBatch, text, ResponseShape::TitledImages, formats.len())
            .with_inputs(&[InputImage::FirstPoster]),
    )
}

pub fn mockup_batch(spec: &CampaignSpec) -> Option<PromptPlan> {
    let ideas = spec.mockup_ideas();
    if ideas.is_empty() {
        return None;
    }
    let list = ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| format!("{}. {}", i + 1, idea))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        "You are a mockup specialist. Take the provided poster image and place it onto a variety \
         of realistic mockups.\n\
         \n\
         Generate a separate, final image for each of the following {count} scenarios:\n\
         {list}\n\
         \n\
         For each image, provide a short, descriptive title as a text part immediately before the \
         image part (e.g., \"Poster mockup on a city billboard.\").",
        count = ideas.len(),
    );

    Some(
        PromptPlan::new(PromptKind::MockupBatch, text, ResponseShape::TitledImages, ideas.len())
            .with_inputs(&[InputImage::FirstPoster]),
    )
}

/// The poster goes first and the selfie second; the prompt refers to them by position.
pub fn customer_ad(spec: &CampaignSpec, has_selfie: bool) -> Option<PromptPlan> {
    if !spec.generate_customer_ad || !has_selfie {
        return None;
    }

    let text = format!(
        "You are a creative ad designer. A customer has uploaded their selfie to be part of a \
         promotion for \"{name}\".\n\
         Your task is to creatively and tastefully blend the customer's selfie (second image) with \
         the main promotional image (first image).\n\
         \n\
         **Instructions:**\n\
         1.  **Combine Images:** The customer should look happy and engaged with the product/service. \
         The ad should feel authentic, fun, and community-focused. Do not just place the selfie in \
         a box; integrate it naturally.\n\
         2.  **Maintain Branding:** Keep the main promotional text from the first image clear and \
         readable. The offer is \"{offer}\" and the call to action is \"{cta}\".\n\
         3.  **Generate Variations:** Create {CUSTOMER_AD_VARIANTS} fun, distinct variations of this \
         customer-generated ad.\n\
         4.  **Output:** Return exactly {CUSTOMER_AD_VARIANTS} final, edited images as separate \
         parts in your response. Do not add descriptive text.",
        name = spec.business_name,
        offer = spec.offer,
        cta = spec.call_to_action,
    );

    Some(
        PromptPlan::new(
            PromptKind::CustomerAd,
            text,
            ResponseShape::ImageOnly,
            CUSTOMER_AD_VARIANTS,
        )
        .with_inputs(&[InputImage::FirstPoster, InputImage::Selfie]),
    )
}

pub fn multilingual(spec: &CampaignSpec) -> Option<PromptPlan> {
    let languages = spec.languages();
    if languages.is_empty() {
        return None;
    }

    let text = format!(
        "You are a localization expert and graphic designer. The provided poster is in English.\n\
         Your task is to translate and adapt the text on this poster for the following languages: \
         {list}.\n\
         \n\
         **Instructions:**\n\
         1.  **Translate Accurately:** Translate the text content (Business Name, Offer, Call to \
         Action) into each specified language.\n\
         2.  **Maintain Design:** Preserve the original design's style, fonts, colors, and layout \
         as closely as possible.\n\
         3.  **Cultural Adaptation:** Ensure translations are culturally appropriate for local \
         markets.\n\
         4.  **Output Format:** For each language, provide a title with the language name (e.g., \
         \"Title: Spanish Version\") as a text part immediately before its corresponding translated \
         image part.",
        list = languages.join(", "),
    );

    Some(
        PromptPlan::new(
            PromptKind::Multilingual,
            text,
            ResponseShape::TitledImages,
            languages.len(),
        )
        .with_inputs(&[InputImage::FirstPoster]),
    )
}

/// Renders work from the original photo, not from a poster.
pub fn render(spec: &CampaignSpec) -> Option<PromptPlan> {
    if !spec.generate_3d_render {
        return None;
    }

    let text = format!(
        "You are a 3D rendering artist. Transform the provided 2D product photo into a realistic, \
         high-fidelity 3D-like render.\n\
         The product should look hyper-realistic with dynamic lighting, dramatic shadows, and \
         intricate textures.\n\
         Place it against a clean, modern studio background that complements the product.\n\
         \n\
         Generate {RENDER_VARIANTS} different, visually stunning renders from different angles or \
         with different lighting setups.\n\
         For each image, provide a short, descriptive title as a text part immediately before the \
         image part (e.g., \"3D Render - Front View\")."
    );

    Some(
        PromptPlan::new(PromptKind::Render, text, ResponseShape::TitledImages, RENDER_VARIANTS)
            .with_inputs(&[InputImage::Source]),
    )
}

pub fn qr_code(spec: &CampaignSpec) -> Option<PromptPlan> {
    let url = spec.qr_destination()?;

    let text = format!(
        "You are a utility that generates QR codes.\n\
         Create a standard, scannable QR code image that encodes this exact URL: {url}\n\
         \n\
         **Requirements:**\n\
         1.  The QR code must be black on a solid white background.\n\
         2.  Include a standard quiet zone (a blank margin) around the code.\n\
         3.  Do not add any logos, text, or other design elements to the QR code image itself.\n\
         4.  Output a single, high-contrast, clear image that can be reliably scanned by a mobile \
         device."
    );

    Some(
        PromptPlan::new(PromptKind::QrCode, text, ResponseShape::ImageOnly, 1)
            .with_default_title(QR_DEFAULT_TITLE),
    )
}

/// Text-to-image prompt for synthesizing a source photo when none was uploaded.
pub fn source_image(spec: &CampaignSpec) -> String {
    let colors =
        if spec.colors.trim().is_empty() { DEFAULT_SOURCE_COLORS } else { spec.colors.as_str() };
    format!(
        "A professional, high-resolution photograph for a \"{business_type}\" business.\n\
         The user wants an image described as follows: \"{description}\".\n\
         The scene should incorporate brand colors like \"{colors}\".\n\
         The image must be clean, eye-catching, high-quality, and suitable as a primary asset for \
         a marketing poster.\n\
         Avoid any text or logos on the image. Focus on a compelling visual based on the user's \
         description.",
        business_type = spec.business_type,
        description = spec.image_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit_core::OutputFormat;

    fn acme() -> CampaignSpec {
        CampaignSpec {
            business_type: "Cafe".into(),
            business_name: "Acme".into(),
            offer: "20% off".into(),
            call_to_action: "Visit today".into(),
            colors: "red".into(),
            ..Default::default()
        }
    }

    #[test]
    fn poster_inlines_campaign_fields() {
        let plan = poster(&acme());
        assert_eq!(plan.kind, PromptKind::Poster);
        assert_eq!(plan.response, ResponseShape::ImageOnly);
        assert_eq!(plan.expected_images, 3);
        assert_eq!(plan.inputs, vec![InputImage::Source]);
        assert!(plan.text.contains("Business Name: \"Acme\""));
        assert!(plan.text.contains("Offer: \"20% off\""));
        assert!(plan.text.contains("Call to Action: \"Visit today\""));
        assert!(plan.text.contains("Business Type Context: Cafe"));
        assert!(plan.text.contains("Inspired by red"));
        assert!(plan.text.contains("Seasonal Theme: None"));
        assert!(!plan.text.contains("neon lighting"));
        assert!(!plan.text.contains("output resolution"));
    }

    #[test]
    fn poster_special_clauses_follow_toggles() {
        let mut spec = acme();
        spec.neon_glow_mode = true;
        spec.width = "1080".into();
        spec.height = "1350".into();
        spec.seasonal_adaptation = "Christmas".into();
        let text = poster(&spec).text;
        assert!(text.contains(NEON_CLAUSE));
        assert!(text.contains("must be exactly 1080px by 1350px."));
        assert!(text.contains("Seasonal Theme: Christmas"));

        spec.height = "tall".into();
        assert!(!poster(&spec).text.contains("output resolution"));
    }

    #[test]
    fn format_batch_lists_labels_in_declaration_order() {
        let mut spec = acme();
        assert!(format_batch(&spec).is_none());

        spec.format_selections.set(OutputFormat::WhatsappShare, true);
        spec.format_selections.set(OutputFormat::InstagramPost, true);
        let plan = format_batch(&spec).unwrap();
        assert_eq!(plan.expected_images, 2);
        assert_eq!(plan.response, ResponseShape::TitledImages);
        assert_eq!(plan.inputs, vec![InputImage::FirstPoster]);
        assert!(plan.text.contains("each of the following 2 formats"));
        assert!(plan.text.ends_with(
            "1. Title: Instagram Post (1080x1080px)\n2. Title: WhatsApp/Telegram Share Image (800x800px)"
        ));
    }

    #[test]
    fn mockup_batch_skips_blank_entries() {
        let mut spec = acme();
        spec.mockup_requests = " , ,".into();
        assert!(mockup_batch(&spec).is_none());

        spec.mockup_requests = "billboard, , coffee cup ".into();
        let plan = mockup_batch(&spec).unwrap();
        assert_eq!(plan.expected_images, 2);
        assert!(plan.text.contains("1. billboard\n2. coffee cup\n"));
    }

    #[test]
    fn customer_ad_needs_toggle_and_selfie() {
        let mut spec = acme();
        assert!(customer_ad(&spec, true).is_none());
        spec.generate_customer_ad = true;
        assert!(customer_ad(&spec, false).is_none());

        let plan = customer_ad(&spec, true).unwrap();
        assert_eq!(plan.inputs, vec![InputImage::FirstPoster, InputImage::Selfie]);
        assert_eq!(plan.response, ResponseShape::ImageOnly);
        assert_eq!(plan.expected_images, 2);
        assert!(plan.text.contains("promotion for \"Acme\""));
    }

    #[test]
    fn multilingual_joins_languages() {
        let mut spec = acme();
        spec.target_languages = "Spanish,  French ,".into();
        let plan = multilingual(&spec).unwrap();
        assert_eq!(plan.expected_images, 2);
        assert!(plan.text.contains("following languages: Spanish, French."));
    }

    #[test]
    fn render_uses_source_image() {
        let mut spec = acme();
        assert!(render(&spec).is_none());
        spec.generate_3d_render = true;
        let plan = render(&spec).unwrap();
        assert_eq!(plan.inputs, vec![InputImage::Source]);
        assert_eq!(plan.expected_images, 2);
    }

    #[test]
    fn qr_code_requires_url_and_has_no_inputs() {
        let mut spec = acme();
        spec.generate_qr_code = true;
        assert!(qr_code(&spec).is_none());

        spec.qr_code_url = "https://acme.example/menu".into();
        let plan = qr_code(&spec).unwrap();
        assert!(plan.inputs.is_empty());
        assert_eq!(plan.default_title, Some(QR_DEFAULT_TITLE));
        assert!(plan.text.contains("encodes this exact URL: https://acme.example/menu\n"));
    }

    #[test]
    fn plan_all_keeps_stage_order() {
        let mut spec = acme();
        spec.generate_3d_render = true;
        spec.target_languages = "German".into();
        spec.format_selections.set(OutputFormat::Postcard, true);
        let kinds: Vec<_> = plan_all(&spec, false).iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PromptKind::Poster,
                PromptKind::FormatBatch,
                PromptKind::Multilingual,
                PromptKind::Render
            ]
        );
    }

    #[test]
    fn source_prompt_falls_back_to_default_colors() {
        let mut spec = acme();
        spec.image_description = "latte art".into();
        assert!(source_image(&spec).contains("brand colors like \"red\""));
        spec.colors.clear();
        let text = source_image(&spec);
        assert!(text.contains("vibrant and appealing colors"));
        assert!(text.contains("described as follows: \"latte art\""));
    }
}
