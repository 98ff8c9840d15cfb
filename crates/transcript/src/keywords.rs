use std::collections::HashMap;

use crate::tokenize::tokenize;
use crate::types::Transcript;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "arent", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cant", "could", "couldnt", "did", "didnt", "do", "does",
    "doesnt", "doing", "dont", "down", "during", "each", "even", "few", "for", "from", "further",
    "get", "go", "going", "gonna", "got", "had", "hadnt", "has", "hasnt", "have", "havent",
    "having", "he", "hed", "hell", "her", "here", "heres", "hers", "herself", "hes", "him",
    "himself", "his", "how", "hows", "i", "id", "if", "ill", "im", "in", "into", "is", "isnt",
    "it", "its", "itself", "ive", "just", "know", "let", "lets", "like", "me", "mean", "more",
    "most", "much", "my", "myself", "no", "nor", "not", "now", "of", "off", "oh", "ok", "okay",
    "on", "once", "one", "only", "or", "other", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "really", "right", "said", "same", "say", "she", "shed", "shell", "shes",
    "should", "shouldnt", "so", "some", "such", "than", "that", "thats", "the", "their",
    "theirs", "them", "themselves", "then", "there", "theres", "these", "they", "theyd",
    "theyll", "theyre", "theyve", "thing", "things", "think", "this", "those", "through", "to",
    "too", "um", "uh", "under", "until", "up", "us", "very", "was", "wasnt", "we", "wed",
    "well", "were", "werent", "weve", "what", "whats", "when", "whens", "where", "wheres",
    "which", "while", "who", "whom", "whos", "why", "whys", "will", "with", "wont", "would",
    "wouldnt", "yeah", "yes", "you", "youd", "youll", "your", "youre", "yours", "yourself",
    "yourselves", "youve",
];

/// The `k` most frequent non-stop-word tokens across the transcript. Ties go
/// to the word seen first.
pub fn theme_keywords(transcript: &Transcript, k: usize) -> Vec<String> {
    keywords_from(transcript.sentences().iter().map(|s| s.text.as_str()), k)
}

pub fn keywords_from<'a>(texts: impl IntoIterator<Item = &'a str>, k: usize) -> Vec<String> {
    // word -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0;

    for text in texts {
        for token in tokenize(text) {
            if STOP_WORDS.contains(&token.as_str()) {
                continue;
            }
            counts.entry(token).or_insert((0, position)).0 += 1;
            position += 1;
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));
    ranked.into_iter().take(k).map(|(word, _)| word).collect()
}
