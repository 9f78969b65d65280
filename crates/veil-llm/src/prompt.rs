//! Instruction prompt for model-based extraction

use veil_core::Category;

/// System prompt listing every category and the output contract
pub fn system_prompt() -> String {
    let mut prompt = String::from(
        "You find sensitive values in healthcare and legal documents.\n\
         Report every span that belongs to one of these categories:\n",
    );

    for category in Category::ALL {
        prompt.push_str(&format!("- {}: {}\n", category.as_str(), category.description()));
    }

    prompt.push_str(
        "\nRules:\n\
         - Copy each span exactly as it appears in the document, character for character.\n\
         - Report a value once even if it appears several times.\n\
         - Never report dates, legal boilerplate, or generic medical terms such as diagnoses or procedures.\n\
         - Include honorifics and professional suffixes with person names (\"Dr. Jane Roe, M.D.\").\n\
         - Report dosages without the drug name (\"20 mg\"), and amounts with their currency symbol and rate (\"$150/month\").\n\
         \n\
         Answer with a JSON array and nothing else, for example:\n\
         [{\"category\": \"person_name\", \"text\": \"Dr. Jane Roe\"}, {\"category\": \"medication\", \"text\": \"Metformin\"}]\n\
         Answer [] if the document contains none.",
    );
    prompt
}

pub fn user_prompt(document: &str) -> String {
    format!("Document:\n<<<\n{}\n>>>", document)
}
