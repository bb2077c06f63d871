// 📝 Reply Rendering - Templated text for the conversational surfaces
// The engine hands callers typed Reply values; this module is the shared
// renderer the binaries use to turn them into chat text. Nothing in here
// feeds back into dispatch.

use crate::catalog::InstitutionRecord;
use crate::engine::Reply;

/// Thousands-separated dollar figure: 57261 -> "$57,261".
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}

/// Capitalize the first letter of each word: "computer science" ->
/// "Computer Science".
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render a dispatched reply as chat text.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Greeting => {
            "Hello! I'm your college information assistant. I can help you explore \
             universities, compare programs, and find the perfect college for you!"
                .to_string()
        }
        Reply::Farewell => "Goodbye! Good luck with your college search!".to_string(),
        Reply::Help => "I can help you with college information! Try asking me about:\n\
             • Specific colleges (Harvard, MIT, Stanford, etc.)\n\
             • Programs of study\n\
             • Admission requirements\n\
             • Tuition and fees\n\
             • College comparisons"
            .to_string(),
        Reply::CatalogListing(records) => render_catalog_listing(records),
        Reply::Institution(record) => render_profile(record),
        Reply::Programs { keyword, matches } => render_programs(keyword, matches),
        Reply::Comparison(result) => {
            let mut text = String::from("📊 **College Comparison:**\n\n");
            for record in &result.institutions {
                text.push_str(&render_summary(record));
                text.push_str(&format!(
                    "👥 Student Population: {}\n",
                    record.campus_life.student_population
                ));
                if let Some(tuition) = record.tuition.undergraduate_figure() {
                    text.push_str(&format!("💰 Tuition: {}\n", format_usd(tuition)));
                }
                text.push('\n');
            }
            text
        }
        Reply::ComparisonUnavailable(message) => format!(
            "{}. For example: 'Compare Harvard and MIT' or 'Harvard vs Stanford'",
            message
        ),
        Reply::Admission(record) => render_admission_sheet(record),
        Reply::Financial(record) => render_financial_sheet(record),
        Reply::Locations { keyword, matches } => render_locations(keyword, matches),
        Reply::Time(now) => format!("The current time is {}", now.format("%H:%M:%S")),
        Reply::Date(now) => format!("Today's date is {}", now.format("%B %d, %Y")),
        Reply::Question => "That's a great question! I'd be happy to help you with college \
             information. What specific college or topic are you interested in?"
            .to_string(),
        Reply::Fallback => "That's interesting! I'd be happy to help you with college \
             information. What would you like to know?"
            .to_string(),
        Reply::UnknownInstitution => "I couldn't identify which college you're asking about. \
             Please specify: Harvard, MIT, Stanford, Berkeley, Yale, Princeton, or Caltech."
            .to_string(),
        Reply::UnknownProgram => "What program are you interested in? I can help you find \
             colleges that offer programs in Computer Science, Engineering, Business, \
             Medicine, Law, and many more!"
            .to_string(),
        Reply::UnknownLocation => "What location are you interested in? I have colleges in \
             California, Massachusetts, Connecticut, and New Jersey."
            .to_string(),
    }
}

/// Name/location/ranking/acceptance header shared by several templates.
fn render_summary(record: &InstitutionRecord) -> String {
    format!(
        "🏛️ **{}**\n📍 {}\n🏆 Ranking: #{}\n📊 Acceptance Rate: {}%\n",
        record.name, record.location, record.ranking, record.acceptance_rate
    )
}

fn render_catalog_listing(records: &[InstitutionRecord]) -> String {
    let mut text = String::from("Here are the colleges I have information about:\n");
    for record in records {
        text.push_str(&format!(
            "• {} ({}) - #{}\n",
            record.name, record.location, record.ranking
        ));
    }
    text.push_str("\nWhich one interests you?");
    text
}

fn render_profile(record: &InstitutionRecord) -> String {
    let mut text = format!(
        "🏛️ **{}**\n📍 Location: {}\n🏫 Type: {}\n📅 Founded: {}\n🏆 Ranking: #{}\n\
         📊 Acceptance Rate: {}%\n\n",
        record.name,
        record.location,
        record.category,
        record.founded,
        record.ranking,
        record.acceptance_rate
    );

    text.push_str("💰 **Tuition:**\n");
    if let (Some(in_state), Some(out_state)) = (
        record.tuition.undergraduate_in_state,
        record.tuition.undergraduate_out_state,
    ) {
        text.push_str(&format!("• In-state: {}\n", format_usd(in_state)));
        text.push_str(&format!("• Out-of-state: {}\n", format_usd(out_state)));
    } else if let Some(undergraduate) = record.tuition.undergraduate {
        text.push_str(&format!("• Undergraduate: {}\n", format_usd(undergraduate)));
    }
    text.push_str(&format!(
        "• Room & Board: {}\n\n",
        format_usd(record.tuition.room_board)
    ));

    text.push_str("🎓 **Popular Programs:**\n");
    for program in record.programs.undergraduate.iter().take(5) {
        text.push_str(&format!("• {}\n", program));
    }

    text.push_str(&format!(
        "\n📞 Contact: {}\n🌐 Website: {}",
        record.contact.phone, record.website
    ));
    text
}

fn render_programs(keyword: &str, matches: &[InstitutionRecord]) -> String {
    if matches.is_empty() {
        return format!(
            "I couldn't find any colleges offering {} programs in my database.",
            title_case(keyword)
        );
    }

    let mut text = format!("🎓 **Colleges offering {} programs:**\n\n", title_case(keyword));
    for record in matches.iter().take(5) {
        text.push_str(&render_summary(record));
        text.push('\n');
    }
    text
}

fn render_admission_sheet(record: &InstitutionRecord) -> String {
    let req = &record.admission_requirements;
    format!(
        "📋 **{} Admission Requirements:**\n\n\
         📊 **Academic Requirements:**\n\
         • GPA: {}+ (recommended)\n\
         • SAT Score: {}+ (recommended)\n\
         • ACT Score: {}+ (recommended)\n\
         • TOEFL: {}+ (international students)\n\
         • IELTS: {}+ (international students)\n\n\
         📝 **Application Requirements:**\n\
         • Essays: {}\n\
         • Recommendations: {}\n\
         • Application Deadline: {}\n\n\
         📊 **Current Statistics:**\n\
         • Acceptance Rate: {}%\n\
         • Student-Faculty Ratio: {}:1",
        record.name,
        req.gpa,
        req.sat_score,
        req.act_score,
        req.toefl,
        req.ielts,
        req.essays,
        req.recommendations,
        req.deadline,
        record.acceptance_rate,
        record.campus_life.student_faculty_ratio
    )
}

fn render_financial_sheet(record: &InstitutionRecord) -> String {
    let mut text = format!("💰 **{} Financial Information:**\n\n", record.name);

    if let (Some(in_state), Some(out_state)) = (
        record.tuition.undergraduate_in_state,
        record.tuition.undergraduate_out_state,
    ) {
        text.push_str("📚 **Undergraduate Tuition:**\n");
        text.push_str(&format!("• In-state: {}\n", format_usd(in_state)));
        text.push_str(&format!("• Out-of-state: {}\n", format_usd(out_state)));
    } else if let Some(undergraduate) = record.tuition.undergraduate {
        text.push_str(&format!(
            "📚 **Undergraduate Tuition:** {}\n",
            format_usd(undergraduate)
        ));
    }

    text.push_str(&format!(
        "🏠 **Room & Board:** {}\n",
        format_usd(record.tuition.room_board)
    ));

    if let Some(graduate) = record.tuition.graduate {
        text.push_str(&format!("🎓 **Graduate Tuition:** {}\n", format_usd(graduate)));
    }

    text.push_str(&format!(
        "\n📊 **Acceptance Rate:** {}%\n🏆 **Ranking:** #{}",
        record.acceptance_rate, record.ranking
    ));
    text
}

fn render_locations(keyword: &str, matches: &[InstitutionRecord]) -> String {
    if matches.is_empty() {
        return format!(
            "I couldn't find any colleges in {} in my database.",
            title_case(keyword)
        );
    }

    let mut text = format!("📍 **Colleges in {}:**\n\n", title_case(keyword));
    for record in matches {
        text.push_str(&render_summary(record));
        text.push('\n');
    }
    text
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::engine::Engine;
    use std::sync::Arc;

    fn engine() -> Engine {
        Engine::new(Arc::new(CatalogStore::with_defaults()))
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1000), "$1,000");
        assert_eq!(format_usd(57261), "$57,261");
        assert_eq!(format_usd(1234567), "$1,234,567");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("computer science"), "Computer Science");
        assert_eq!(title_case("california"), "California");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_render_profile_mentions_key_facts() {
        let text = render(&engine().handle("tell me about harvard", &[]));

        assert!(text.contains("Harvard University"));
        assert!(text.contains("Cambridge, Massachusetts"));
        assert!(text.contains("$57,261"));
        assert!(text.contains("Ranking: #1"));
    }

    #[test]
    fn test_render_split_tuition_profile() {
        let text = render(&engine().handle("tell me about berkeley", &[]));

        assert!(text.contains("In-state: $14,312"));
        assert!(text.contains("Out-of-state: $44,007"));
    }

    #[test]
    fn test_render_comparison_names_both() {
        let text = render(&engine().handle("compare harvard and mit", &[]));

        assert!(text.contains("Harvard University"));
        assert!(text.contains("Massachusetts Institute of Technology"));
        assert!(text.contains("Student Population"));
    }

    #[test]
    fn test_render_empty_program_listing() {
        let reply = Reply::Programs {
            keyword: "underwater basket weaving".to_string(),
            matches: Vec::new(),
        };
        assert!(render(&reply).contains("couldn't find any colleges offering"));
    }

    #[test]
    fn test_render_locations() {
        let text = render(&engine().handle("where can i find schools in california", &[]));

        assert!(text.contains("Colleges in California"));
        assert!(text.contains("Stanford University"));
        assert!(text.contains("California Institute of Technology"));
    }

    #[test]
    fn test_every_reply_variant_renders_nonempty() {
        let engine = engine();
        for text in [
            "hello",
            "goodbye",
            "help",
            "list all universities",
            "tell me about yale",
            "i want to study law",
            "compare harvard and mit",
            "compare hogwarts and narnia",
            "what gpa do i need",
            "how much is tuition",
            "where can i find schools in california",
            "what time is it",
            "what day is it",
            "do you dream?",
            "xyzzy",
        ] {
            assert!(!render(&engine.handle(text, &[])).is_empty());
        }
    }
}
