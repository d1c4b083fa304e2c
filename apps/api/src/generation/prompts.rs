// Prompt templates and sampling parameters for resume and cover-letter generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{NO_FABRICATION_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::GenerationParams;
use crate::models::{non_blank, CompanyInfo, DocumentKind, UserProfile};

pub const RESUME_TEMPERATURE: f32 = 0.7;
pub const RESUME_MAX_TOKENS: u32 = 1500;
pub const COVER_LETTER_TEMPERATURE: f32 = 0.7;
pub const COVER_LETTER_MAX_TOKENS: u32 = 1200;

/// Resume prompt. Replace every `{placeholder}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = "\
Create a professional resume for the following person. \
Format it as clean, structured text that can be easily converted to HTML.

Personal Information:
- Name: {name}
- Email: {email}
- Phone: {phone}
- Address: {address}
- LinkedIn: {linkedin}

Education: {education}

Work Experience: {work_experience}

Skills: {skills}

Target Job Role: {job_role}

Additional Information: {additional_info}

Please create a professional, ATS-friendly resume with clear sections, using these headings: \
PROFESSIONAL SUMMARY, EDUCATION, WORK EXPERIENCE, SKILLS, ADDITIONAL INFORMATION. \
Include a professional summary at the top that highlights key qualifications for the target role.

{plain_text_instruction}
{no_fabrication_instruction}";

/// Cover-letter prompt. Replace every `{placeholder}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "\
Write a professional cover letter for the following person applying to {company_name} \
for the position of {job_role}.

Applicant Information:
- Name: {name}
- Target Role: {job_role}
- Work Experience: {work_experience}
- Skills: {skills}
- Education: {education}

Company Information:
- Company Name: {company_name}
- Job Description/Requirements: {job_description}
- Hiring Manager: {hiring_manager}

Create a compelling, personalized cover letter that:
1. Shows enthusiasm for the role and company
2. Highlights relevant experience and skills
3. Demonstrates knowledge of the company/role
4. Has a professional tone
5. Is concise but impactful

Format it as a proper business letter, with paragraphs separated by blank lines.
{no_fabrication_instruction}";

/// Sampling parameters for a document kind.
pub fn generation_params(kind: DocumentKind, model: &str) -> GenerationParams {
    let (temperature, max_tokens) = match kind {
        DocumentKind::Resume => (RESUME_TEMPERATURE, RESUME_MAX_TOKENS),
        DocumentKind::CoverLetter => (COVER_LETTER_TEMPERATURE, COVER_LETTER_MAX_TOKENS),
    };

    GenerationParams {
        model: model.to_string(),
        temperature,
        max_tokens,
    }
}

/// Fills `{key}` placeholders in one left-to-right scan. Substituted values are
/// copied through as-is, so braces inside user text are never expanded. Unknown
/// keys are left in place.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let filled = tail[1..].find('}').and_then(|end| {
            let key = &tail[1..=end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 2))
        });

        match filled {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn build_resume_prompt(profile: &UserProfile) -> String {
    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("name", profile.name.trim()),
            ("email", profile.email.trim()),
            ("phone", profile.phone.trim()),
            ("address", profile.address.trim()),
            ("linkedin", non_blank(&profile.linkedin).unwrap_or("N/A")),
            ("education", profile.education.trim()),
            ("work_experience", profile.work_experience.trim()),
            ("skills", profile.skills.trim()),
            ("job_role", profile.job_role.trim()),
            (
                "additional_info",
                non_blank(&profile.additional_info).unwrap_or("None"),
            ),
            ("plain_text_instruction", PLAIN_TEXT_INSTRUCTION),
            ("no_fabrication_instruction", NO_FABRICATION_INSTRUCTION),
        ],
    )
}

pub fn build_cover_letter_prompt(profile: &UserProfile, company: &CompanyInfo) -> String {
    let company_name = match company.company_name.trim() {
        "" => "the company",
        name => name,
    };

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("company_name", company_name),
            ("job_role", profile.job_role.trim()),
            ("name", profile.name.trim()),
            ("work_experience", profile.work_experience.trim()),
            ("skills", profile.skills.trim()),
            ("education", profile.education.trim()),
            (
                "job_description",
                non_blank(&company.job_description).unwrap_or("Not provided"),
            ),
            (
                "hiring_manager",
                non_blank(&company.hiring_manager).unwrap_or("Hiring Manager"),
            ),
            ("no_fabrication_instruction", NO_FABRICATION_INSTRUCTION),
        ],
    )
}
