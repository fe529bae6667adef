use indicatif::{ProgressBar, ProgressStyle};

// "█▉▊▋▌▍▎▏  ·"
const PROGRES_CHARS: &str =
    "\u{2588}\u{2589}\u{258a}\u{258b}\u{258c}\u{258d}\u{258e}\u{258f}  \u{b7}";

#[derive(Default, Debug)]
pub struct Bar {
    pub progress: Option<ProgressBar>,
}

impl Bar {
    #[must_use]
    pub fn new(file_size: u64, quiet: bool) -> Self {
        if quiet {
            return Self::default();
        }

        let pb = ProgressBar::new(file_size);

        let style_result = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:50.green/blue} {bytes}/{total_bytes} ({bytes_per_sec} - {eta})");

        let style = match style_result {
            Ok(style) => style,
            Err(err) => {
                eprintln!("Error creating progress bar style: {err}");
                return Self { progress: None };
            }
        };

        pb.set_style(style.progress_chars(PROGRES_CHARS));

        Self { progress: Some(pb) }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(pb) = &self.progress {
            pb.inc(delta);
        }
    }

    /// Run `f` with the bar hidden, so its output doesn't get mixed with the bar
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        match &self.progress {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish();
        }
    }
}
