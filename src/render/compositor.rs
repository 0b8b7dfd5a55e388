use rayon::prelude::*;

use crate::assets::fonts::FontBook;
use crate::canvas::buffer::PixelBuffer;
use crate::canvas::factory::CanvasFactory;
use crate::config::EngineConfig;
use crate::encode::format::{EncodedImage, FormatEncoder, OutputOptions};
use crate::foundation::error::{PicEditError, PicEditResult};
use crate::render::image::{ImageOverlay, RasterImageOverlay};
use crate::render::text::{TextRenderer, create_text_renderer};
use crate::scene::model::{CanvasSpec, Operation};

/// One independent render: canvas, ordered operations and output settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Canvas to start from.
    pub canvas: CanvasSpec,
    /// Operations applied in order.
    pub operations: Vec<Operation>,
    /// Encoding of the result.
    pub output: OutputOptions,
}

/// Applies an ordered operation list to a fresh canvas.
///
/// A compositor owns no per-render state, so one instance can serve many renders concurrently.
/// Each render gets its own [`PixelBuffer`].
pub struct Compositor {
    factory: CanvasFactory,
    text: Box<dyn TextRenderer>,
    images: Box<dyn ImageOverlay>,
    encoder: FormatEncoder,
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("factory", &self.factory)
            .field("text", &self.text)
            .field("images", &self.images)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl Compositor {
    /// Build a compositor, loading fonts as described by `config.fonts`.
    pub fn new(config: &EngineConfig) -> PicEditResult<Self> {
        config.validate()?;
        let fonts = FontBook::from_config(&config.fonts);
        Self::with_fonts(config, fonts)
    }

    /// Build a compositor around an already loaded font book.
    pub fn with_fonts(config: &EngineConfig, fonts: FontBook) -> PicEditResult<Self> {
        config.validate()?;
        Self::with_backends(
            config,
            create_text_renderer(config.text_backend, fonts),
            Box::new(RasterImageOverlay::new(config.resample)),
        )
    }

    /// Build a compositor with explicit text and image backends.
    pub fn with_backends(
        config: &EngineConfig,
        text: Box<dyn TextRenderer>,
        images: Box<dyn ImageOverlay>,
    ) -> PicEditResult<Self> {
        config.validate()?;
        let pool = build_thread_pool(config.worker_threads)?;
        tracing::debug!(
            threads = config.worker_threads,
            resample = ?config.resample,
            "compositor ready"
        );
        Ok(Self {
            factory: CanvasFactory::new(config.resample),
            text,
            images,
            encoder: FormatEncoder,
            pool,
        })
    }

    /// Run the cheap checks on `spec` and every operation without touching pixels.
    pub fn validate(&self, spec: &CanvasSpec, ops: &[Operation]) -> PicEditResult<()> {
        spec.validate()?;
        for (index, op) in ops.iter().enumerate() {
            op.validate().map_err(|e| e.at_operation(index, op.kind()))?;
        }
        Ok(())
    }

    /// Create the canvas and apply `ops` in order.
    ///
    /// Any failing operation aborts the render; no partially drawn canvas is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(width = spec.width, height = spec.height, ops = ops.len()))]
    pub fn render(&self, spec: &CanvasSpec, ops: &[Operation]) -> PicEditResult<PixelBuffer> {
        self.validate(spec, ops)?;
        let mut canvas = self.factory.create(spec)?;
        for (index, op) in ops.iter().enumerate() {
            self.apply(&mut canvas, op)
                .map_err(|e| e.at_operation(index, op.kind()))?;
        }
        Ok(canvas)
    }

    /// Render and encode.
    #[tracing::instrument(level = "debug", skip_all, fields(format = %output.format))]
    pub fn render_encoded(
        &self,
        spec: &CanvasSpec,
        ops: &[Operation],
        output: OutputOptions,
    ) -> PicEditResult<EncodedImage> {
        output.validate()?;
        let canvas = self.render(spec, ops)?;
        self.encoder.encode(&canvas, output)
    }

    /// Render independent jobs on the engine's worker pool. Results keep the input order.
    pub fn render_batch(&self, jobs: &[RenderJob]) -> Vec<PicEditResult<EncodedImage>> {
        tracing::debug!(jobs = jobs.len(), "rendering batch");
        self.pool.install(|| {
            jobs.par_iter()
                .map(|job| self.render_encoded(&job.canvas, &job.operations, job.output))
                .collect()
        })
    }

    fn apply(&self, canvas: &mut PixelBuffer, op: &Operation) -> PicEditResult<()> {
        match op {
            Operation::Text(text) => self.text.render_text(canvas, text),
            Operation::Image(image) => self.images.overlay_image(canvas, image),
        }
    }
}

fn build_thread_pool(threads: usize) -> PicEditResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(PicEditError::invalid_config("worker_threads must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("picedit-worker-{i}"))
        .build()
        .map_err(|e| PicEditError::invalid_config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
