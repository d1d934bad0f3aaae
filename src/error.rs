/// Errors surfaced by the metronome
#[derive(Debug)]
pub enum Error {
    /// No default output device on the host
    NoOutputDevice,
    /// Output device only offers a sample format the renderer can't write
    UnsupportedSampleFormat(cpal::SampleFormat),
    /// Could not query the device's default output config
    DeviceConfig(cpal::DefaultStreamConfigError),
    BuildStream(cpal::BuildStreamError),
    /// Audio output refused to start (device lost, not permitted)
    PlayStream(cpal::PlayStreamError),
    /// Renderer queue is full; the tone was not submitted
    ToneQueueFull,
    /// `start()` called on a tick source that is already running
    TickSourceRunning,
    /// Tick worker thread panicked and took the tick channel with it
    TickWorkerPanicked,
    /// Note resolution other than 4, 8 or 16
    UnknownResolution(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoOutputDevice => write!(f, "no default output device available"),
            Error::UnsupportedSampleFormat(format) => {
                write!(f, "unsupported output sample format: {}", format)
            }
            Error::DeviceConfig(e) => write!(f, "failed to fetch default output config: {}", e),
            Error::BuildStream(e) => write!(f, "failed to build output stream: {}", e),
            Error::PlayStream(e) => write!(f, "failed to start audio output: {}", e),
            Error::ToneQueueFull => write!(f, "tone queue is full"),
            Error::TickSourceRunning => write!(f, "tick source is already running"),
            Error::TickWorkerPanicked => write!(f, "tick worker thread panicked"),
            Error::UnknownResolution(value) => write!(
                f,
                "unknown note resolution {} (expected 4, 8 or 16)",
                value
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeviceConfig(e) => Some(e),
            Error::BuildStream(e) => Some(e),
            Error::PlayStream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<cpal::DefaultStreamConfigError> for Error {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        Error::DeviceConfig(e)
    }
}

impl From<cpal::BuildStreamError> for Error {
    fn from(e: cpal::BuildStreamError) -> Self {
        Error::BuildStream(e)
    }
}

impl From<cpal::PlayStreamError> for Error {
    fn from(e: cpal::PlayStreamError) -> Self {
        Error::PlayStream(e)
    }
}
