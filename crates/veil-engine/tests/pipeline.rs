use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use veil_config::{Config, ExtractorKind};
use veil_core::{Category, Document, Entity, Error, Extractor, LogStyle, Transformation, normalize};
use veil_detect::{HybridExtractor, RegexExtractor};
use veil_engine::Pipeline;

const INTAKE: &str = "PATIENT INTAKE SUMMARY
Date of visit: January 5, 2024 (01/05/2024)

Patient Jane Doe was seen by Dr. Patricia Williams at St. Mary's Medical Center.
Dr. Patricia Williams prescribed Lisinopril 20 mg daily.
Address: 1420 Maple Avenue, Suite 3, Springfield, IL 62704
Phone: (217) 555-0142. Email: p.williams@stmarys.org
Policy No. BRX-5521-7789 with BlueRiver Insurance Company; copay $150/month.
SSN 123-45-6789. Williams will follow up on 2024-01-05.
";

fn regex_pipeline() -> Pipeline {
    Pipeline::new(Arc::new(RegexExtractor::new()))
}

fn substitute<'a>(t: &'a Transformation, original: &str) -> &'a str {
    t.replacements
        .iter()
        .find(|r| r.original == original)
        .map(|r| r.substitute.as_str())
        .unwrap_or_else(|| panic!("no replacement for {}", original))
}

/// Walk the input and output together: every byte between entities must
/// be copied, every entity must carry its mapped substitute
fn assert_only_entities_changed(input: &str, t: &Transformation) {
    let substitutes: HashMap<(Category, String), &str> = t
        .replacements
        .iter()
        .map(|r| ((r.category, normalize(&r.original)), r.substitute.as_str()))
        .collect();

    let mut cursor_in = 0;
    let mut cursor_out = 0;
    for entity in &t.entities {
        let gap = &input[cursor_in..entity.start];
        assert!(t.text[cursor_out..].starts_with(gap), "gap before {:?} changed", entity.text);
        cursor_out += gap.len();

        let sub = substitutes[&(entity.category, normalize(&entity.text))];
        assert!(t.text[cursor_out..].starts_with(sub), "{:?} not replaced by {:?}", entity.text, sub);
        cursor_out += sub.len();
        cursor_in = entity.end;
    }
    assert_eq!(&t.text[cursor_out..], &input[cursor_in..]);
}

#[tokio::test]
async fn test_intake_document_end_to_end() {
    let document = Document::new("text:intake", INTAKE);
    let t = regex_pipeline().transform(&document).await.unwrap();

    assert_only_entities_changed(INTAKE, &t);
    assert_eq!(t.text.lines().count(), INTAKE.lines().count());

    let categories: Vec<Category> = t.replacements.iter().map(|r| r.category).collect();
    for expected in [
        Category::PersonName,
        Category::HealthcareFacility,
        Category::Organization,
        Category::StreetAddress,
        Category::PhoneNumber,
        Category::EmailAddress,
        Category::AccountNumber,
        Category::IdentificationNumber,
        Category::Medication,
        Category::Dosage,
        Category::MonetaryAmount,
    ] {
        assert!(categories.contains(&expected), "missing {}", expected);
    }

    for original in ["Jane Doe", "Patricia Williams", "Lisinopril", "555-0142", "BRX-5521-7789", "123-45-6789"] {
        assert!(!t.text.contains(original), "{} leaked", original);
    }
}

#[tokio::test]
async fn test_month_surname_leaves_dates_alone() {
    let text = "Ms. May signed the release. Payment is due May 5, 2024, and May will pay in May.\n";
    let document = Document::new("text:release", text);
    let t = regex_pipeline().transform(&document).await.unwrap();

    assert_only_entities_changed(text, &t);
    assert!(t.text.contains("due May 5, 2024"), "{}", t.text);
    assert!(t.text.ends_with("pay in May.\n"), "{}", t.text);
    assert!(!t.text.starts_with("Ms. May "), "{}", t.text);
}

#[tokio::test]
async fn test_recurring_name_gets_one_substitute() {
    let document = Document::new("text:intake", INTAKE);
    let t = regex_pipeline().transform(&document).await.unwrap();

    let doctor = t
        .replacements
        .iter()
        .find(|r| r.original == "Dr. Patricia Williams")
        .unwrap();
    assert_eq!(doctor.occurrences, 2);
    assert_eq!(t.text.matches(doctor.substitute.as_str()).count(), 2);

    // The bare surname follows the full name's surname
    let surname = doctor.substitute.rsplit(' ').next().unwrap();
    assert_eq!(substitute(&t, "Williams"), surname);
}

#[tokio::test]
async fn test_dates_survive_untouched() {
    let document = Document::new("text:intake", INTAKE);
    let t = regex_pipeline().transform(&document).await.unwrap();
    assert!(t.text.contains("January 5, 2024 (01/05/2024)"));
    assert!(t.text.contains("follow up on 2024-01-05."));
}

#[tokio::test]
async fn test_amount_in_plausible_band() {
    let document = Document::new("text:intake", INTAKE);
    for seed in 0..25 {
        let t = regex_pipeline()
            .with_seed(Some(seed))
            .transform(&document)
            .await
            .unwrap();
        let amount = substitute(&t, "$150/month");
        let value: f64 = amount
            .trim_start_matches('$')
            .trim_end_matches("/month")
            .replace(',', "")
            .parse()
            .unwrap();
        assert!((112.0..=203.0).contains(&value), "{}", amount);
        assert_ne!(value, 150.0);
    }
}

#[tokio::test]
async fn test_same_seed_same_output() {
    let a = Document::new("text:a", INTAKE);
    let b = Document::new("text:b", INTAKE);
    let pipeline = regex_pipeline();

    let first = pipeline.transform(&a).await.unwrap();
    let second = pipeline.transform(&b).await.unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(first.seed, second.seed);

    let seeded = pipeline.transform_seeded(&a, Some(first.seed ^ 1)).await.unwrap();
    assert_ne!(seeded.text, first.text);
}

#[tokio::test]
async fn test_no_entities_leaves_document_unchanged() {
    let text = "The quick brown fox jumps over the lazy dog.\n";
    let t = regex_pipeline()
        .transform(&Document::new("text:", text))
        .await
        .unwrap();
    assert_eq!(t.text, text);
    assert!(t.replacements.is_empty());

    let output = t.to_text(&LogStyle::default());
    assert_eq!(
        output,
        format!("{}===== REPLACEMENT LOG =====\n(no replacements)\n===== END LOG =====\n", text)
    );
}

#[tokio::test]
async fn test_log_lists_categories() {
    let t = regex_pipeline()
        .transform(&Document::new("text:", "Dr. Patricia Williams prescribed Metformin."))
        .await
        .unwrap();
    let log = t.log(&LogStyle::default());
    assert!(log.starts_with("===== REPLACEMENT LOG =====\n[person_name]\nDr. Patricia Williams => "));
    assert!(log.contains("[medication]\nMetformin => "));
    assert!(log.ends_with("(1)\n===== END LOG =====\n"));

    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["replacements"][0]["category"], "person_name");
}

#[tokio::test]
async fn test_transform_glob_source() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.txt"), "Patient Jane Doe takes Metformin.\n").unwrap();
    std::fs::write(dir.path().join("b.txt"), "Nothing to see here.\n").unwrap();
    std::fs::write(dir.path().join("c.md"), "Mr. Lee\n").unwrap();

    let uri = format!("glob:{}/*.txt", dir.path().display());
    let results = regex_pipeline().transform_source(&uri).await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].source_uri.ends_with("a.txt"));
    assert_eq!(results[0].replacements.len(), 2);
    assert_eq!(results[1].text, "Nothing to see here.\n");
}

#[tokio::test]
async fn test_transform_text_source() {
    let results = regex_pipeline()
        .transform_source("text:Call (217) 555-0142")
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].text.starts_with("Call ("));
    assert_ne!(results[0].text, "Call (217) 555-0142");
}

struct Unreachable;

#[async_trait]
impl Extractor for Unreachable {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn extract(&self, _text: &str) -> veil_core::Result<Vec<Entity>> {
        Err(Error::Model("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_hybrid_falls_back_to_patterns() {
    let hybrid = HybridExtractor::new(vec![Arc::new(Unreachable), Arc::new(RegexExtractor::new())]);
    let pipeline = Pipeline::new(Arc::new(hybrid));
    let t = pipeline
        .transform(&Document::new("text:", "Take Lisinopril 20 mg."))
        .await
        .unwrap();
    assert_eq!(t.replacements.len(), 2);
}

#[tokio::test]
async fn test_model_failure_surfaces_in_llm_mode() {
    let mut config = Config::default();
    config.extractor = ExtractorKind::Llm;
    config.llm.endpoint = "http://127.0.0.1:9/v1".to_string();
    config.llm.timeout_secs = 2;

    let pipeline = Pipeline::from_config(&config).unwrap();
    let result = pipeline
        .transform(&Document::new("text:", "Dr. Patricia Williams"))
        .await;
    assert!(result.is_err());
}
