use crate::color::BackgroundColor;
use crate::icon_resizer::{
    self, IconError, ResizeRequest, ResizedIcon, DEFAULT_BACKGROUND, DEFAULT_SCALE_FACTOR,
};
use std::path::PathBuf;

/// Fixed inputs for regenerating the installable-app icons.
#[derive(Debug, Clone)]
pub struct PwaIconConfig {
    pub public_dir: PathBuf,
    pub source_name: String,
    pub large_name: String,
    pub small_name: String,
    pub scale_factor: f64,
    pub background: String,
    /// Edge the web manifest declares for the large icon.
    pub expected_large_edge: u32,
    pub small_edge: u32,
}

impl Default for PwaIconConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            source_name: "pwa-icon-source.png".to_string(),
            large_name: "pwa-512x512.png".to_string(),
            small_name: "pwa-192x192.png".to_string(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            background: DEFAULT_BACKGROUND.to_string(),
            expected_large_edge: 512,
            small_edge: 192,
        }
    }
}

impl PwaIconConfig {
    pub fn source_path(&self) -> PathBuf {
        self.public_dir.join(&self.source_name)
    }

    pub fn large_path(&self) -> PathBuf {
        self.public_dir.join(&self.large_name)
    }

    pub fn small_path(&self) -> PathBuf {
        self.public_dir.join(&self.small_name)
    }
}

#[derive(Debug)]
pub enum PwaIconReport {
    SourceMissing {
        path: PathBuf,
    },
    Finished {
        large: Result<ResizedIcon, IconError>,
        small: Result<ResizedIcon, IconError>,
    },
}

impl PwaIconReport {
    pub fn is_complete(&self) -> bool {
        matches!(
            self,
            PwaIconReport::Finished {
                large: Ok(_),
                small: Ok(_),
            }
        )
    }
}

/// Writes the padded large icon from the source, then scales that file
/// down to the small icon so both share the same padding.
///
/// Failures are logged and returned in the report, never raised.
pub fn generate_pwa_icons(config: &PwaIconConfig) -> PwaIconReport {
    let source = config.source_path();
    if !source.exists() {
        eprintln!("⚠ Source file not found: {}", source.display());
        return PwaIconReport::SourceMissing { path: source };
    }

    log::debug!("Generating PWA icons from {}", source.display());
    let large_path = config.large_path();
    let large = build_large_icon(config, source, large_path.clone());

    if let Ok(icon) = &large {
        let edge = config.expected_large_edge;
        if icon.width != edge || icon.height != edge {
            eprintln!(
                "⚠ Warning: {} is {}x{}, not {}x{}; it keeps the source image's dimensions",
                icon.output.display(),
                icon.width,
                icon.height,
                edge,
                edge
            );
        }
    }

    // Runs even if the large step failed; an older large icon may still be there
    let small = icon_resizer::resize_exact(
        &large_path,
        &config.small_path(),
        config.small_edge,
        config.small_edge,
    );

    PwaIconReport::Finished { large, small }
}

fn build_large_icon(
    config: &PwaIconConfig,
    source: PathBuf,
    output: PathBuf,
) -> Result<ResizedIcon, IconError> {
    let background = match config.background.parse::<BackgroundColor>() {
        Ok(color) => color,
        Err(e) => {
            let err = IconError::from(e);
            eprintln!("{}", icon_resizer::failure_message(&err));
            return Err(err);
        }
    };

    let request = ResizeRequest::new(source, output)
        .with_scale_factor(config.scale_factor)
        .with_background(background);

    icon_resizer::resize_icon(&request)
}
