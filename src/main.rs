mod color;
mod icon_resizer;
mod pwa_icons;

use pwa_icons::{generate_pwa_icons, PwaIconConfig, PwaIconReport};

fn main() {
    env_logger::init(); // Initialize logger

    // Failures are only reported; the exit status stays zero
    match generate_pwa_icons(&PwaIconConfig::default()) {
        PwaIconReport::SourceMissing { path } => {
            println!("ℹ Nothing generated, add {} and run again", path.display());
        }
        report if report.is_complete() => println!("🎉 PWA icons generated"),
        PwaIconReport::Finished { .. } => eprintln!("⚠ PWA icons were only partly generated"),
    }
}
