use crate::catalog::{FacultyMember, Publication, join_publications};
use tera::{Context, Tera};

/// System instruction used when a caller supplies none.
pub const DEFAULT_PERSONA: &str = "\
You are the IUB Virtual Assistant (Islamia University Bahawalpur).
You provide information about admissions, departments, campus life, and academic rules.
Be professional, helpful, and polite. If you don't know a specific recent detail,
advise the user to check the official website iub.edu.pk. Keep answers concise.";

/// Fixed instruction for biography generation.
pub const BIO_WRITER_PERSONA: &str = "\
You write concise institutional biographies for faculty of The Islamia University of Bahawalpur.";

const IMAGE_TEMPLATE: &str = "\
A professional, high-quality, wide-angle architectural photograph of the {{ subject }} building \
at a modern Islamic university campus. The style should be clean, academic, and majestic, \
with clear blue sky and landscaped surroundings. Realistic photography style.";

const BIO_TEMPLATE: &str = "\
Write a prestigious, engaging, and informative academic biography (max 4 sentences) for {{ name }}, \
who serves as {{ role }} at The Islamia University of Bahawalpur.
Academic Profile:
- Qualifications: {{ qualification }}
- Specialized Research Areas: {{ interests }}
- Notable Scholarly Contributions: {{ publications }}

The biography should synthesize these elements to highlight their unique expertise and the broader \
impact of their research within the global academic community. Maintain a tone of institutional \
excellence. Do not include introductory phrases like \"Here is the biography.\"";

const FACULTY_PERSONA_TEMPLATE: &str = "\
You are a research assistant for {{ name }} at IUB.
Information about them:
Designation: {{ designation }}
Qualification: {{ qualification }}
Bio: {{ bio }}
Research Interests: {{ interests }}
Selected Publications (Journal): {{ publications }}
Research & Working Papers: {{ papers }}
Conference Presentations: {{ conferences }}

Answer questions specifically about this person's work, background, and expertise at IUB.
Be professional and scholarly. If asked about things outside their expertise, politely steer \
the conversation back to their work.";

fn render(template: &str, ctx: &Context) -> anyhow::Result<String> {
    Ok(Tera::one_off(template, ctx, false)?)
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

/// Prompt for a department building photograph.
pub fn image_prompt(subject: &str) -> anyhow::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("subject", subject);
    render(IMAGE_TEMPLATE, &ctx)
}

/// Prompt for a short generated faculty biography.
pub fn bio_prompt(
    name: &str,
    role: &str,
    qualification: &str,
    interests: &[String],
    publications: &[Publication],
) -> anyhow::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("name", name);
    ctx.insert("role", role);
    ctx.insert("qualification", qualification);
    ctx.insert("interests", &interests.join(", "));
    ctx.insert("publications", &join_publications(publications, ", "));
    render(BIO_TEMPLATE, &ctx)
}

/// System instruction scoping the assistant to one faculty member.
///
/// `generated_bio` is used only when the record has no bio of its own.
pub fn faculty_persona(
    member: &FacultyMember,
    generated_bio: Option<&str>,
) -> anyhow::Result<String> {
    let bio = member
        .fixture_bio()
        .or(generated_bio.filter(|b| !b.trim().is_empty()))
        .unwrap_or("Academic background is distinguished.");

    let mut ctx = Context::new();
    ctx.insert("name", &member.name);
    ctx.insert("designation", &member.designation);
    ctx.insert("qualification", &member.qualification);
    ctx.insert("bio", bio);
    ctx.insert(
        "interests",
        &or_placeholder(
            member.research_interests.join(", "),
            "Various topics in their field.",
        ),
    );
    ctx.insert(
        "publications",
        &or_placeholder(
            join_publications(&member.publications, "; "),
            "Multiple scholarly articles.",
        ),
    );
    ctx.insert(
        "papers",
        &or_placeholder(
            member.research_papers.join("; "),
            "Various ongoing research works.",
        ),
    );
    ctx.insert(
        "conferences",
        &or_placeholder(
            member.conferences.join("; "),
            "Several international presentations.",
        ),
    );
    render(FACULTY_PERSONA_TEMPLATE, &ctx)
}
