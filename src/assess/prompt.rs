//! Natural-language prompt templates sent to the completion endpoint.

use crate::catalog::{Comparison, Medication};

/// Elapsed-time horizons the two-medication prompt asks about.
pub const TIME_HORIZONS: [&str; 4] = ["1 month", "6 months", "1 year", "5 years"];

/// Ask for the top-10 long-term implications of one medication.
pub fn risk_prompt(medication: Medication) -> String {
    format!(
        "You are a highly skilled clinical researcher with over 20 years of experience studying \
the impacts of over-the-counter medications. Your task is to provide a concise yet comprehensive \
list of the top 10 long-term health implications regarding the use of {medication}.
For each implication, please provide:
1. A brief title (1-5 words)
2. A concise explanation (1-2 sentences)
3. The severity level (Low, Moderate, High, or Severe)
4. The estimated frequency of occurrence (Rare, Uncommon, Common, or Very Common)
Your response should be structured as follows:
1. [Title]: [Explanation]. Severity: [Level]. Frequency: [Occurrence rate].
2. [Title]: [Explanation]. Severity: [Level]. Frequency: [Occurrence rate].
...
Ensure that your list covers a range of body systems and potential complications, focusing on \
the most significant long-term effects based on current medical knowledge. Prioritize accuracy \
and clinical relevance in your response."
    )
}

/// Ask for a polypharmic risk score of `medication` against `target`.
///
/// `risks` is the text previously returned for [`risk_prompt`] and is embedded verbatim.
pub fn score_prompt(medication: Medication, risks: &str, target: &Comparison) -> String {
    let question = match target {
        Comparison::Disease(disease) => format!(
            "What is the polypharmic risk score for {medication} when used by a patient with {disease}?"
        ),
        Comparison::Medication(other) => format!(
            "What is the polypharmic risk score for {medication} when used together with {other}?"
        ),
    };
    let subject = match target {
        Comparison::Disease(_) => "the specific disease",
        Comparison::Medication(_) => "the second medication",
    };
    let pairing = match target {
        Comparison::Disease(_) => "the medication and the disease",
        Comparison::Medication(_) => "the two medications",
    };
    let over_time = match target {
        Comparison::Disease(_) => {
            "4. Call out the specific implications with use over time.".to_string()
        }
        Comparison::Medication(_) => format!(
            "4. Call out the specific implications of combined use after {}.",
            TIME_HORIZONS.join(", ")
        ),
    };

    format!(
        "Based on the following risks associated with {medication}:

{risks}

{question}

Please provide:
1. A numerical score from 1-100, where 100 represents the highest risk. Start your answer with a \
line of the form \"Score: <number>\".
2. A brief explanation of how you arrived at this score, considering both the medication risks \
and {subject}.
3. Any specific concerns or interactions between {pairing} that significantly influence the risk \
score.
{over_time}"
    )
}
