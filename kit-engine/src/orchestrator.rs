//! # Kit Orchestrator
//!
//! Runs the generation stages for one submission, strictly in order, and
//! assembles the [`MarketingKit`].
//!
//! Only the poster stage is mandatory: if it yields no image the submission
//! fails with [`KitError::NoPosters`] before any other request is sent. Other
//! stages may come back empty without failing. Any error from the generator
//! aborts the whole submission and the partial kit is dropped.

use crate::generator::{GenerationRequest, ImageGenerator, SynthesisRequest};
use crate::parser::parse_parts;
use crate::prompt::{self, InputImage, PromptKind, PromptPlan};
use kit_core::{
    CampaignSpec, FormatAsset, GeneratedAsset, KitError, MarketingKit, Result, SourceAsset,
};
use tracing::{Instrument, debug, info, info_span, instrument, warn};

pub struct KitOrchestrator<G> {
    generator: G,
}

impl<G: ImageGenerator> KitOrchestrator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Synthesize a source photo from the campaign description.
    #[instrument(skip_all, fields(generator = self.generator.name()))]
    pub async fn generate_source_image(&self, spec: &CampaignSpec) -> Result<SourceAsset> {
        let request = SynthesisRequest::new(prompt::source_image(spec));
        let image = self.generator.synthesize(request).await?.into_iter().next();
        match image {
            Some(image) => {
                info!(
                    media_type = image.media_type(),
                    bytes = image.bytes().len(),
                    "source image ready"
                );
                Ok(image)
            }
            None => Err(KitError::NoSourceImage),
        }
    }

    /// Produce a full kit from `source` and, when supplied, the customer's selfie.
    #[instrument(
        skip_all,
        fields(generator = self.generator.name(), kit_id = tracing::field::Empty)
    )]
    pub async fn generate_kit(
        &self,
        spec: &CampaignSpec,
        source: &SourceAsset,
        selfie: Option<&SourceAsset>,
    ) -> Result<MarketingKit> {
        let mut kit = MarketingKit::empty();
        tracing::Span::current().record("kit_id", tracing::field::display(kit.id));

        let plans = prompt::plan_all(spec, selfie.is_some());
        info!(stages = plans.len(), "starting kit generation");

        for plan in &plans {
            let inputs = resolve_inputs(plan, &kit, source, selfie)?;
            let span = info_span!("stage", kind = %plan.kind, expected = plan.expected_images);
            let assets = self.run_stage(plan, inputs).instrument(span).await?;
            store(&mut kit, plan.kind, assets)?;
        }

        info!(assets = kit.asset_count(), "kit generation finished");
        Ok(kit)
    }

    async fn run_stage(
        &self,
        plan: &PromptPlan,
        inputs: Vec<SourceAsset>,
    ) -> Result<Vec<GeneratedAsset>> {
        let request =
            GenerationRequest { prompt: plan.text.clone(), images: inputs, shape: plan.response };
        let parts = self.generator.generate(request).await?;
        let assets = parse_parts(&parts, plan.default_title);

        if assets.len() != plan.expected_images {
            warn!(received = assets.len(), "image count differs from request");
        } else {
            debug!(received = assets.len(), "stage complete");
        }
        Ok(assets)
    }
}

fn resolve_inputs(
    plan: &PromptPlan,
    kit: &MarketingKit,
    source: &SourceAsset,
    selfie: Option<&SourceAsset>,
) -> Result<Vec<SourceAsset>> {
    plan.inputs
        .iter()
        .map(|input| match input {
            InputImage::Source => Ok(source.clone()),
            // Each stage decodes its own copy of the poster.
            InputImage::FirstPoster => kit.first_poster().ok_or(KitError::NoPosters)?.to_source(),
            InputImage::Selfie => selfie
                .cloned()
                .ok_or_else(|| KitError::config("customer selfie is required for this stage")),
        })
        .collect()
}

fn store(kit: &mut MarketingKit, kind: PromptKind, assets: Vec<GeneratedAsset>) -> Result<()> {
    match kind {
        PromptKind::Poster => {
            if assets.is_empty() {
                return Err(KitError::NoPosters);
            }
            kit.posters = assets;
        }
        PromptKind::FormatBatch => {
            kit.social_media = assets.into_iter().map(FormatAsset::from).collect();
        }
        PromptKind::MockupBatch => kit.mockups = assets,
        PromptKind::CustomerAd => kit.customer_ads = assets,
        PromptKind::Multilingual => kit.multilingual_versions = assets,
        PromptKind::Render => kit.renders = assets,
        PromptKind::QrCode => kit.qr_code = assets.into_iter().next(),
    }
    Ok(())
}
