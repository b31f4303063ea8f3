//! Resume intake — turns an uploaded resume into a skill list.
//!
//! Text is pulled from the upload, then scanned for known skill names on word
//! boundaries. Only vocabulary skills are recognised.

use bytes::Bytes;
use regex::Regex;

use crate::errors::AppError;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "pdf", "doc", "docx"];

/// Skills recognised in resumes on top of the taxonomy and curated table.
const COMMON_SKILLS: &[&str] = &[
    "Communication",
    "Leadership",
    "Project Management",
    "Statistics",
    "Deep Learning",
    "Data Visualization",
    "Excel",
    "Tableau",
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "React",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Docker",
    "Kubernetes",
    "AWS",
    "Cloud",
    "Git",
    "Linux",
];

/// Lower-cased extension, if the filename has one.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn allowed_file(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Extracts plain text from an uploaded resume. PDF parsing runs on the
/// blocking pool; other formats are decoded as lossy UTF-8.
pub async fn extract_text(filename: &str, data: Bytes) -> Result<String, AppError> {
    match extension(filename).as_deref() {
        Some("pdf") => {
            let joined =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                    .await;
            match joined {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(e)) => {
                    tracing::debug!("PDF extraction failed: {e:?}");
                    Err(unreadable_pdf())
                }
                // pdf-extract panics on some malformed documents
                Err(e) if e.is_panic() => Err(unreadable_pdf()),
                Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                    "PDF extraction task failed: {e}"
                ))),
            }
        }
        Some(_) => Ok(String::from_utf8_lossy(&data).into_owned()),
        None => Err(AppError::Validation("File type not allowed.".to_string())),
    }
}

fn unreadable_pdf() -> AppError {
    AppError::Validation("Unable to read text from the PDF resume.".to_string())
}

/// Known skill names with their case-insensitive, word-bounded matchers.
pub struct SkillVocabulary {
    entries: Vec<(String, Regex)>,
}

impl SkillVocabulary {
    /// Builds the vocabulary from `primary` (usually the taxonomy and curated
    /// skills) followed by the built-in common skills. Repeats are dropped.
    pub fn new<I, S>(primary: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        let all = primary
            .into_iter()
            .map(Into::<String>::into)
            .chain(COMMON_SKILLS.iter().map(|s| s.to_string()));
        for name in all {
            let name = name.trim().to_string();
            if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
                names.push(name);
            }
        }

        let entries = names
            .into_iter()
            .map(|name| {
                let pattern = format!(r"(?i)(?:^|[^\w]){}(?:$|[^\w])", regex::escape(&name));
                Regex::new(&pattern).map(|re| (name, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Vocabulary skills mentioned in `text`, canonical spelling, vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
