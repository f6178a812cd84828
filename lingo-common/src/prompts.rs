//! Prompt templates sent to the generative model
//!
//! The similar-sentences template must keep the tag lines in sync with
//! [`crate::parsing::SimilarField::tag`].

/// Prompt asking for three graded similar sentences, a tip and a context paragraph
pub fn similar_sentences(sentence: &str) -> String {
    format!(
        "Given this English sentence: \"{sentence}\"\n\
         Provide the following:\n\
         1. Three similar sentences of increasing complexity\n\
         2. A practical tip for sentence construction\n\
         3. A contextual paragraph that naturally uses similar sentence structures and demonstrates practical usage.\n\
         The paragraph should incorporate elements from the example sentences and feel natural in everyday conversation.\n\
         \n\
         Format your response exactly like this:\n\
         SIMILAR1: [basic similar sentence]\n\
         SIMILAR2: [intermediate similar sentence]\n\
         SIMILAR3: [advanced similar sentence]\n\
         TIP: [brief grammar or usage tip]\n\
         CONTEXT: [natural paragraph using similar structures and demonstrating practical usage]"
    )
}

/// Prompt asking for a grammatically corrected, simplified version of `text`
pub fn refine_grammar(text: &str) -> String {
    format!(
        "Make the following text grammatically correct without changing its context.\n\
         Make it simple and use only simple and intermediate English words.\n\
         The goal is to make it clear and easy to understand while maintaining the original meaning.\n\
         \n\
         Original text: \"{text}\"\n\
         \n\
         Please provide only the corrected text without any explanations or additional comments."
    )
}
