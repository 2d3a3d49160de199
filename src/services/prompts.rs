//! Prompt text for the scout, writer and validator agents.
//!
//! Everything channel-specific comes from the brand profile; the wording
//! here only frames it.

use std::fmt::Write as _;

use crate::domain::models::{BrandProfile, GenerationContext, ScriptFormat, TrendingItem};

/// Topic used when no trending candidates are available at all.
pub const DEFAULT_TOPIC: &str = "The Latest JavaScript Framework Nobody Asked For";

/// Number of candidates offered to the topic selector.
pub const TOPIC_CANDIDATES: usize = 10;

const HUNDRED_SECONDS_TEMPLATE: &str = "\
[0:00-0:05] HOOK
One deadpan sentence stating the obvious. Grab attention immediately.

[0:05-0:20] SETUP
What is it and why should anyone care? Two or three quick sentences, lightly sarcastic.

[0:20-1:20] CORE
Three to five key points. Each one: the feature, a reality check, then a code snippet or visual.
Code goes in fenced markdown blocks.

[1:20-1:35] CONCLUSION
A prediction with a twist.

[1:35-1:45] CTA
A subscribe call written in the style of the topic itself.

---

**B-ROLL SUGGESTIONS:**
- Editor with highlighted code
- Terminal output
- Diagrams or animations
- Logos of the tools mentioned";

const CODE_REPORT_TEMPLATE: &str = "\
[0:00-0:15] HOOK
Breaking-news delivery. Two or three punchy sentences.

[0:15-0:45] CONTEXT
How we got here, who is behind it and which problem it claims to solve.

[0:45-1:15] THE BASICS
How it actually works, compared with the alternatives. A small code example if it helps.

[1:15-3:15] DEEP DIVE
Six to ten points of ten to twenty seconds each: realistic code in fenced blocks,
performance notes, trade-offs, gotchas and edge cases, with sarcastic interjections.

[3:15-3:45] PRACTICAL USE CASES
When to use it, when not to, and who already runs it in production.

[3:45-4:15] HOT TAKES & PREDICTIONS
Community reaction, drama and a verdict on adoption.

[4:15-4:30] WRAP UP
One-line verdict that calls back to the hook.

[4:30-4:45] CTA
An on-brand call to action in the topic's own idiom.

---

**B-ROLL SUGGESTIONS:**
- Editor with real code
- Repository screenshots
- Architecture diagrams
- Community comments
- Benchmarks and side-by-side comparisons";

const TUTORIAL_TEMPLATE: &str = "\
[0:00-0:10] HOOK
What the viewer will build, why it is useful and how long it takes.

[0:10-0:30] PREREQUISITES
Required knowledge and tools, stated precisely.

[0:30-X] MAIN CONTENT
Step by step. For each step explain the concept, show the code in a fenced block
and call out the gotcha. Mention common mistakes.

[X-Y] TIPS & TRICKS
Advanced variations, performance notes and best practices.

[Y-Z] SUMMARY & CTA
Three to five takeaways and a topic-flavoured subscribe call.

---

**B-ROLL SUGGESTIONS:**
- Live coding
- Output visualisation
- Before and after comparisons
- Repository structure";

/// Timestamped section layout for a script format.
pub const fn format_template(format: ScriptFormat) -> &'static str {
    match format {
        ScriptFormat::HundredSeconds => HUNDRED_SECONDS_TEMPLATE,
        ScriptFormat::CodeReport => CODE_REPORT_TEMPLATE,
        ScriptFormat::Tutorial => TUTORIAL_TEMPLATE,
    }
}

fn joined_head(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

fn bullet_list(items: &[String]) -> String {
    let mut out = String::new();
    for item in items.iter().filter(|i| !i.trim().is_empty()) {
        let _ = writeln!(out, "- {}", item.trim());
    }
    if out.is_empty() {
        out.push_str("- (none)\n");
    }
    out
}

/// System prompt for research briefs.
pub fn scout_system_prompt(channel: &str, profile: &BrandProfile) -> String {
    let name = profile.display_name(channel);
    let humor = profile.extra_list("humor_types");

    format!(
        "You scout technology topics for {name}, a programming video channel.\n\
         Find angles developers will actually want to watch.\n\n\
         Voice: {tone}\n\
         Humor: {humor}\n\
         Signature phrases: {phrases}\n\n\
         Favour breaking releases, tech drama, absurd trends and developer pain.\n\n\
         Structure the brief as:\n\
         1. Summary (two or three sentences)\n\
         2. Why developers care\n\
         3. Three to five talking points\n\
         4. Meme potential from 1 to 10\n\
         5. Suggested angle: hot take or educational\n\
         6. Code examples or tools worth showing",
        tone = profile.tone.join(", "),
        humor = if humor.is_empty() {
            "programming memes".to_string()
        } else {
            humor.join(", ")
        },
        phrases = joined_head(&profile.signature_phrases, 3),
    )
}

/// User message asking for a research brief on `topic`.
pub fn research_user_message(channel: &str, profile: &BrandProfile, topic: &str) -> String {
    format!(
        "Research this topic for a {name} video: {topic}\n\n\
         Cover what it is, why developers should care, the controversial or funny angles, \
         the key technical details, visual or meme ideas, and related topics.",
        name = profile.display_name(channel),
    )
}

/// System prompt for picking one topic from the candidates.
pub fn topic_selector_system_prompt(channel: &str, profile: &BrandProfile) -> String {
    format!(
        "You pick video topics for {name}. Prefer topics that suit a {tone} voice, \
         developer pain points and tech culture.",
        name = profile.display_name(channel),
        tone = profile.tone.join(", "),
    )
}

/// Numbered candidate list; the model must answer with one title verbatim.
pub fn topic_selection_message(channel: &str, profile: &BrandProfile, items: &[TrendingItem]) -> String {
    let mut listing = String::new();
    for (i, item) in items.iter().take(TOPIC_CANDIDATES).enumerate() {
        let _ = writeln!(listing, "{}. {} (score: {})", i + 1, item.title, item.score);
    }

    format!(
        "Pick the ONE trending topic below that would make the best {name} video.\n\
         Weigh developer interest, humour potential, timeliness and fit with the channel voice.\n\n\
         Topics:\n{listing}\n\
         Reply with the topic title exactly as written above and nothing else.",
        name = profile.display_name(channel),
    )
}

/// Few-shot system prompt for the writer.
pub fn writer_system_prompt(channel: &str, profile: &BrandProfile) -> String {
    let name = profile.display_name(channel);
    let sentence_length = profile.target_sentence_length().unwrap_or(10);

    format!(
        "You write scripts for {name}, a fast programming video channel.\n\n\
         Match the rhythm of these excerpts, not just the vocabulary:\n\n\
         \"Kubernetes. It runs your containers. Then it runs you. \
         Three hundred lines of YAML later, your hello world is highly available. \
         Nobody knows why it restarted at 3am.\"\n\n\
         \"GraphQL. Ask for exactly the data you need. \
         Then write a resolver for every field you forgot existed. \
         Your backend team will love you. Briefly.\"\n\n\
         Voice:\n\
         - Tone: {tone}\n\
         - Formality: {formality}\n\
         - Pacing: {pacing}\n\
         - Sentences around {sentence_length} words\n\
         - Pattern: state the obvious, undercut it, end on a twist\n\n\
         Signature phrases, used sparingly: {phrases}\n\n\
         Never use: {avoid}\n\n\
         Keep sentences short and declarative. Put sarcastic comments inside code examples. \
         Always finish with B-roll suggestions.",
        tone = profile.tone.join(", "),
        formality = profile.formality_level,
        pacing = profile.pacing,
        phrases = joined_head(&profile.signature_phrases, 3),
        avoid = joined_head(&profile.avoid, 3),
    )
}

/// User message for a first draft or a refinement.
pub fn writer_user_message(
    channel: &str,
    profile: &BrandProfile,
    context: &GenerationContext,
    format: ScriptFormat,
) -> String {
    let name = profile.display_name(channel);
    let source = match context {
        GenerationContext::Research { brief } => format!("RESEARCH BRIEF:\n{brief}"),
        GenerationContext::Refinement {
            draft,
            weaknesses,
            suggestions,
        } => refinement_brief(draft, weaknesses, suggestions),
    };

    format!(
        "Write a {name} script.\n\n\
         {source}\n\n\
         FORMAT: {format}\n\
         TEMPLATE:\n{template}\n\n\
         Rules:\n\
         1. Follow the template and keep its timestamps.\n\
         2. State the obvious, undercut it, add a twist.\n\
         3. Average eight to fifteen words per sentence.\n\
         4. Put code in fenced markdown blocks with a language tag.\n\
         5. Make the B-roll suggestions specific.\n\
         6. Leave two blank lines after every timestamp header.\n\
         7. It must sound like {name}, not a generic assistant.\n\n\
         Write the complete script now.",
        template = format_template(format),
    )
}

/// Previous draft plus validator feedback, framed as a rewrite request.
pub fn refinement_brief(draft: &str, weaknesses: &[String], suggestions: &[String]) -> String {
    format!(
        "FEEDBACK ON THE PREVIOUS SCRIPT\n\n\
         Weaknesses:\n{weak}\n\
         Suggestions:\n{sugg}\n\
         PREVIOUS SCRIPT:\n{draft}\n\n\
         Rewrite the script so every weakness and suggestion above is addressed.",
        weak = bullet_list(weaknesses),
        sugg = bullet_list(suggestions),
    )
}

/// System prompt for the semantic evaluator. Embeds the whole profile.
pub fn validator_system_prompt(channel: &str, profile: &BrandProfile) -> String {
    let name = profile.display_name(channel);
    let profile_json =
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| format!("{profile:?}"));

    format!(
        "You are a brand voice reviewer for video scripts.\n\n\
         Channel: {name}\n\n\
         Channel profile:\n{profile_json}\n\n\
         Return a score from 0 to 100 for how closely the script matches {name}, \
         your reasoning, concrete strengths, concrete weaknesses and actionable suggestions. \
         Be strict and specific."
    )
}

pub fn validator_user_message(channel: &str, profile: &BrandProfile, text: &str) -> String {
    format!(
        "Review this script for {name} brand voice consistency:\n\n{text}",
        name = profile.display_name(channel),
    )
}
