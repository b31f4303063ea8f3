//! Job Finder — keyword filter over the catalog.

use crate::catalog::{JobCatalog, JobPosting};

/// Returns the postings whose description contains at least one of `skills`,
/// compared case-insensitively. Catalog order is preserved.
pub fn find_jobs<S: AsRef<str>>(skills: &[S], catalog: &JobCatalog) -> Vec<JobPosting> {
    let needles: Vec<String> = skills
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();

    if needles.is_empty() {
        return vec![];
    }

    catalog
        .postings()
        .iter()
        .filter(|job| {
            let description = job.description.to_lowercase();
            needles.iter().any(|skill| description.contains(skill.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::posting;

    fn sample_catalog() -> JobCatalog {
        JobCatalog::new(vec![
            posting(
                "Data Scientist",
                "TechCorp",
                "Looking for a Data Scientist with strong Python, SQL, and Machine Learning skills.",
            ),
            posting(
                "Web Developer",
                "Code Inc.",
                "Experienced Web Developer needed with JavaScript, HTML, and CSS skills.",
            ),
            posting(
                "AI Engineer",
                "AI Innovators",
                "Seeking an AI Engineer with expertise in AI, Machine Learning, and algorithms.",
            ),
            posting(
                "Business Analyst",
                "Global Solutions",
                "Need a Business Analyst with strong communication and analysis skills.",
            ),
        ])
    }

    fn titles(jobs: &[JobPosting]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let jobs = find_jobs(&["python"], &sample_catalog());
        assert_eq!(titles(&jobs), vec!["Data Scientist"]);
    }

    #[test]
    fn test_any_skill_matches_and_order_is_stable() {
        let jobs = find_jobs(&["Communication", "Machine Learning"], &sample_catalog());
        assert_eq!(
            titles(&jobs),
            vec!["Data Scientist", "AI Engineer", "Business Analyst"]
        );
    }

    #[test]
    fn test_substring_semantics() {
        // "analysis" is a substring of the Business Analyst description only.
        let jobs = find_jobs(&["Analysis"], &sample_catalog());
        assert_eq!(titles(&jobs), vec!["Business Analyst"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(find_jobs(&["COBOL"], &sample_catalog()).is_empty());
    }

    #[test]
    fn test_empty_skills_returns_empty() {
        let skills: Vec<String> = vec![];
        assert!(find_jobs(&skills, &sample_catalog()).is_empty());
    }

    #[test]
    fn test_inclusion_matches_definition_for_every_posting() {
        let catalog = sample_catalog();
        let skills = ["sql", "CSS", "Rust"];
        let found = find_jobs(&skills, &catalog);
        for job in catalog.postings() {
            let expected = skills
                .iter()
                .any(|s| job.description.to_lowercase().contains(&s.to_lowercase()));
            assert_eq!(found.contains(job), expected, "mismatch for {}", job.title);
        }
    }
}
