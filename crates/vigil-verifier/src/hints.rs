//! Advisory hints per claim kind
//!
//! Hints never change confidence. They name evidence a claim of this kind
//! usually carries and this one does not.

use vigil_domain::ClaimKind;

const IMPLEMENTATION_EXTENSIONS: &[&str] = &[
    "rs", "py", "go", "ts", "js", "java", "kt", "c", "cc", "cpp", "h", "hpp", "rb", "swift",
];

fn looks_like_test(id: &str) -> bool {
    id.to_lowercase().contains("test")
}

fn looks_like_implementation(id: &str) -> bool {
    id.rsplit_once('.')
        .map(|(_, ext)| IMPLEMENTATION_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn looks_like_benchmark(id: &str) -> bool {
    id.to_lowercase().contains("bench")
}

/// Hints for a claim of `kind` citing `evidence`
pub(crate) fn kind_hints(kind: ClaimKind, evidence: &[&str]) -> Vec<String> {
    let mut hints = Vec::new();

    match kind {
        ClaimKind::Completion => {
            if !evidence.iter().any(|id| looks_like_test(id)) {
                hints.push("Completion claim without test evidence".to_string());
            }
        }
        ClaimKind::Capability => {
            if !evidence.iter().any(|id| looks_like_implementation(id)) {
                hints.push("Capability claim without implementation evidence".to_string());
            }
        }
        ClaimKind::Performance => {
            if !evidence.iter().any(|id| looks_like_benchmark(id)) {
                hints.push("Performance claim without benchmark evidence".to_string());
            }
        }
        ClaimKind::Technical => {}
    }

    hints
}

const CREATION_STEMS: &[&str] = &["creat", "build", "built", "implement", "add"];

const INFLECTIONS: &[&str] = &["", "e", "s", "es", "d", "ed", "ing"];

/// Whether an action description reads as creating something new
///
/// Matches the creation verbs in any common inflection ("building",
/// "created", "adds") without catching unrelated words like "address".
pub(crate) fn is_creation(action: &str) -> bool {
    action
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| {
            CREATION_STEMS.iter().any(|stem| {
                word.strip_prefix(stem)
                    .is_some_and(|rest| INFLECTIONS.contains(&rest))
            })
        })
}
