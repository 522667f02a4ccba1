// ── Predefined filters ────────────────────────────────────────────────────────
//
// Process-wide read-only table, built on first access and never mutated.
// `FileFilter` is immutable, so handing out `&'static` references is safe
// from any thread.

use once_cell::sync::Lazy;

use crate::filter::FileFilter;

/// Commonly used filters, grouped by media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonFilter {
    // Generic
    All,
    // Audio
    AudioAll,
    Mp3,
    Aac,
    Flac,
    Wav,
    Ogg,
    Opus,
    Dolby,
    Ac3,
    Eac3,
    Pcm,
    // Video
    VideoAll,
    Mp4,
    Mkv,
    Avi,
    Mov,
    Webm,
    MediaContainers,
    // Images
    ImageAll,
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
    Webp,
    // Documents
    Documents,
    Pdf,
    Word,
    Excel,
    PowerPoint,
    Text,
    // Archives
    Archives,
    Zip,
    Rar,
    SevenZip,
    Tar,
    // Code / data
    SourceCode,
    Python,
    Json,
    Xml,
    Yaml,
    Csv,
}

impl CommonFilter {
    /// Every catalog entry, in declaration order.
    pub const ALL: [CommonFilter; 43] = [
        Self::All,
        Self::AudioAll,
        Self::Mp3,
        Self::Aac,
        Self::Flac,
        Self::Wav,
        Self::Ogg,
        Self::Opus,
        Self::Dolby,
        Self::Ac3,
        Self::Eac3,
        Self::Pcm,
        Self::VideoAll,
        Self::Mp4,
        Self::Mkv,
        Self::Avi,
        Self::Mov,
        Self::Webm,
        Self::MediaContainers,
        Self::ImageAll,
        Self::Png,
        Self::Jpeg,
        Self::Bmp,
        Self::Gif,
        Self::Tiff,
        Self::Webp,
        Self::Documents,
        Self::Pdf,
        Self::Word,
        Self::Excel,
        Self::PowerPoint,
        Self::Text,
        Self::Archives,
        Self::Zip,
        Self::Rar,
        Self::SevenZip,
        Self::Tar,
        Self::SourceCode,
        Self::Python,
        Self::Json,
        Self::Xml,
        Self::Yaml,
        Self::Csv,
    ];

    /// Label and raw extension tokens for this entry.
    pub fn definition(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::All => ("All files", &["*.*"]),

            Self::AudioAll => (
                "Audio files",
                &["mp3", "aac", "m4a", "flac", "wav", "w64", "ogg", "opus", "alac", "aiff", "pcm", "raw"],
            ),
            Self::Mp3 => ("MP3 audio", &["mp3"]),
            Self::Aac => ("AAC audio", &["aac", "m4a"]),
            Self::Flac => ("FLAC audio", &["flac"]),
            Self::Wav => ("Wave audio", &["wav", "w64"]),
            Self::Ogg => ("Ogg Vorbis audio", &["ogg"]),
            Self::Opus => ("Opus audio", &["opus"]),
            Self::Dolby => ("Dolby lossy audio", &["ac3", "eac3", "ec3"]),
            Self::Ac3 => ("AC3 audio", &["ac3"]),
            Self::Eac3 => ("EAC3 audio", &["eac3", "ec3"]),
            Self::Pcm => ("PCM audio", &["pcm", "raw"]),

            Self::VideoAll => (
                "Video files",
                &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "mpg", "mpeg", "m4v"],
            ),
            Self::Mp4 => ("MP4 video", &["mp4", "m4v"]),
            Self::Mkv => ("Matroska video", &["mkv"]),
            Self::Avi => ("AVI video", &["avi"]),
            Self::Mov => ("QuickTime video", &["mov"]),
            Self::Webm => ("WebM video", &["webm"]),
            Self::MediaContainers => (
                "Media containers",
                &["mkv", "mka", "mp4", "m4a", "mpa", "avi", "mov"],
            ),

            Self::ImageAll => (
                "Image files",
                &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp", "heic"],
            ),
            Self::Png => ("PNG image", &["png"]),
            Self::Jpeg => ("JPEG image", &["jpg", "jpeg"]),
            Self::Bmp => ("Bitmap image", &["bmp"]),
            Self::Gif => ("GIF image", &["gif"]),
            Self::Tiff => ("TIFF image", &["tiff"]),
            Self::Webp => ("WebP image", &["webp"]),

            Self::Documents => (
                "Documents",
                &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "txt", "rtf"],
            ),
            Self::Pdf => ("PDF documents", &["pdf"]),
            Self::Word => ("Word documents", &["doc", "docx"]),
            Self::Excel => ("Excel spreadsheets", &["xls", "xlsx"]),
            Self::PowerPoint => ("PowerPoint presentations", &["ppt", "pptx"]),
            Self::Text => ("Text files", &["txt", "rtf", "md"]),

            Self::Archives => ("Archive files", &["zip", "rar", "7z", "tar", "gz", "bz2", "xz"]),
            Self::Zip => ("ZIP archive", &["zip"]),
            Self::Rar => ("RAR archive", &["rar"]),
            Self::SevenZip => ("7-Zip archive", &["7z"]),
            Self::Tar => ("TAR archive", &["tar", "gz", "bz2", "xz"]),

            Self::SourceCode => (
                "Source code",
                &["py", "c", "cpp", "h", "hpp", "cs", "java", "js", "ts", "rs", "go"],
            ),
            Self::Python => ("Python source", &["py"]),
            Self::Json => ("JSON files", &["json"]),
            Self::Xml => ("XML files", &["xml"]),
            Self::Yaml => ("YAML files", &["yml", "yaml"]),
            Self::Csv => ("CSV files", &["csv"]),
        }
    }

    /// The shared, immutable filter for this entry.
    pub fn filter(self) -> &'static FileFilter {
        &CATALOG[self as usize]
    }
}

/// Built in `CommonFilter::ALL` order so `self as usize` indexes it.
static CATALOG: Lazy<Vec<FileFilter>> = Lazy::new(|| {
    CommonFilter::ALL
        .iter()
        .filter_map(|&c| {
            let (label, exts) = c.definition();
            FileFilter::new(label, exts.iter().copied()).ok()
        })
        .collect()
});

// ── Tests ─────────────────────────────────────────────────────────────────────
