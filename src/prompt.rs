// src/prompt.rs
//! Deterministic alignment prompt - fixed instruction header, both texts embedded verbatim

/// Build the alignment prompt sent to the model. The template is fixed within
/// a run; the resume and job text are embedded as-is and trusted not to break
/// the frame, since the model is the only consumer.
pub fn build_alignment_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        r#"You are a professional resume editor specialized in optimizing resumes for Applicant Tracking Systems (ATS) and recruiter evaluation.

### Your Objective:
Enhance the provided resume to align it with the job description while maintaining formatting and improving professional appeal.

### Instructions:
1. Keep all section headers (e.g., Professional Summary, Work Experience, Education, etc.) as they are.
2. Update the **Professional Summary** to reflect the target job description with strong, recruiter-friendly language.
3. Enrich **Work Experience** bullet points with:
   - Metrics (e.g., 20% improvement, 10K+ users)
   - Action verbs
   - Technologies or tools mentioned in the JD
4. Expand **Technical Skills** to reflect tools, frameworks, and languages mentioned in the JD.
5. Maintain document **formatting**, including:
   - Bold for section titles and company names
   - Font size between **10.5-12 pt** using standard fonts like **Calibri or Helvetica**
   - 1.0-1.15 line spacing
   - Bullet alignment, paragraph structure
   - Clear margins and spacing
6. Do not change layout, structure, or remove any existing sections.
7. Return **only the fully updated resume content** in the same format. No extra commentary.

### Resume:
{resume_text}

### Job Description:
{job_text}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts_verbatim() {
        let resume = "**Summary**\nExperienced engineer.\n- Led team of 5";
        let job = "Looking for Python, distributed systems experience";
        let prompt = build_alignment_prompt(resume, job);

        assert!(prompt.contains(resume));
        assert!(prompt.contains(job));
        assert!(prompt.starts_with("You are a professional resume editor"));
    }

    #[test]
    fn test_prompt_demands_bare_output() {
        let prompt = build_alignment_prompt("resume", "job");
        assert!(prompt.contains("No extra commentary"));
        assert!(prompt.contains("### Resume:"));
        assert!(prompt.contains("### Job Description:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            build_alignment_prompt("a", "b"),
            build_alignment_prompt("a", "b")
        );
    }
}
