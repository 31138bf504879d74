// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.
// Templates use `{placeholder}` markers, replaced before sending.

// ────────────────────────────────────────────────────────────────────────────
// Step 1: job-description analysis
// ────────────────────────────────────────────────────────────────────────────

pub const ANALYSIS_SYSTEM: &str =
    "You are an expert resume consultant who analyzes job descriptions.";

/// Replace `{job_description}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract:
1. Key technical skills required
2. Soft skills required
3. Years of experience needed
4. Main responsibilities
5. Nice-to-have skills
6. Company culture keywords

Job Description:
{job_description}

Provide the analysis in JSON format with these keys:
{
    "required_skills": [],
    "soft_skills": [],
    "experience_years": "",
    "responsibilities": [],
    "nice_to_have": [],
    "culture_keywords": []
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Step 2: summary
// ────────────────────────────────────────────────────────────────────────────

/// Summary replies are plain text, so this prompt carries no JSON suffix.
pub const SUMMARY_SYSTEM: &str = "You are an expert resume writer with strong analytical skills. \
    Think carefully about the candidate's ACTUAL background before creating a summary. \
    Ground the summary in their real experience and skills. \
    Don't over-tailor or fabricate capabilities.";

/// Replace: {current_title}, {skills}, {education}, {required_skills},
///          {responsibilities}, {culture_keywords}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Create a compelling professional summary (2-3 sentences) for a resume.

User's Background:
- Current Experience: {current_title}
- Skills: {skills}
- Education: {education}

Job Requirements:
- Required Skills: {required_skills}
- Responsibilities: {responsibilities}
- Culture Keywords: {culture_keywords}

Create a summary that:
1. Highlights relevant experience and skills matching the job
2. Uses keywords from the job description naturally
3. Demonstrates value proposition
4. Is concise and impactful

Return ONLY the summary text, nothing else."#;

// ────────────────────────────────────────────────────────────────────────────
// Step 3: per-experience tailoring
// ────────────────────────────────────────────────────────────────────────────

pub const EXPERIENCE_SYSTEM: &str = "You are an expert resume writer with strong analytical skills. \
Your job is to THINK STEP-BY-STEP before creating content. CRITICAL RULES:
1. REASON about what makes sense for the actual role and company
2. Ground ALL content in reality - no fabrication
3. Each bullet MUST start with a DIFFERENT action verb (NO repetition)
4. Keep industry context authentic - don't insert inappropriate keywords
5. Highlight real transferable skills without misrepresenting work
6. If something doesn't make sense for the role/company, DON'T include it";

/// Shared head of both experience prompts.
/// Replace: {title}, {company}, {start_date}, {end_date}, {skills_line},
///          {existing_bullets}, {existing_verbs}, {experience_years},
///          {required_skills}, {responsibilities}, {soft_skills}, {extra_context}
pub const EXPERIENCE_CONTEXT_TEMPLATE: &str = r#"STEP 1: ANALYZE THE CONTEXT
Current Role: {title} at {company}
Work Period: {start_date} - {end_date}
{skills_line}
Existing Responsibilities (your SOURCE OF TRUTH - these are REAL activities):
{existing_bullets}

Action verbs already used: {existing_verbs}

Target Role: {experience_years} position
Target Requirements:
- Core Skills: {required_skills}
- Responsibilities: {responsibilities}
- Soft Skills: {soft_skills}

Extra Context:
{extra_context}"#;

/// Used when the entry already declares its skills: bullets only.
/// Replace: {context}, {title}, {company}, {grounding}, {bullet_count}
pub const EXPERIENCE_BULLETS_TEMPLATE: &str = r#"You are generating resume bullets. Think step-by-step and reason carefully.

{context}

STEP 2: REASON ABOUT WHAT MAKES SENSE
Before writing bullets, think through:
1. What industry is {company} in? (insurance, SaaS, healthcare, pharmacy, etc.)
2. What would a {title} ACTUALLY do in that industry?
3. What are the REAL transferable skills from this role?
4. Which existing bullets show relevant capabilities?
5. How can I reframe WITHOUT fabricating or misrepresenting?

{grounding}

STEP 4: CREATE BULLETS
Now create {bullet_count} bullet points that:
- **NO VERB REPETITION** - Each bullet starts with a DIFFERENT action verb
- Are factually grounded in the existing responsibilities
- Highlight transferable skills authentically
- Use industry-appropriate terminology for {company}
- Maximum 25 words each
- Show operational capabilities without misrepresenting

Return as JSON:
{"bullets": ["bullet 1", "bullet 2", ...]}"#;

/// Used when the entry has no skills yet: skills plus bullets.
/// Replace: {context}, {title}, {company}, {bullet_count}
pub const EXPERIENCE_SKILLS_AND_BULLETS_TEMPLATE: &str = r#"You are generating resume content. Think step-by-step and reason carefully.

{context}

STEP 2: REASON ABOUT WHAT MAKES SENSE
Before creating content, think through:
1. What industry is {company} actually in?
2. What would a {title} REALISTICALLY do at this company?
3. What skills would this person ACTUALLY have?
4. What are authentic transferable capabilities from this role?
5. What tools/processes are REALISTIC for this industry?

STEP 3: INDUSTRY AUTHENTICITY CHECK
- Insurance company → policies, regulations, underwriting, claims, risk assessment
- SaaS company → product development, user engagement, feature launches, subscriptions
- Healthcare → patient systems, clinical workflows, compliance, medical records
- Pharmacy → medication management, clinical processes, regulatory compliance
- DO NOT mix industries or insert inappropriate terminology

STEP 4: CREATE CONTENT
Now create:
1. 5-8 skills authentic to {title} at {company} AND transferable to target role
2. {bullet_count} bullet points that:
   - **NO VERB REPETITION** - Each bullet starts with a DIFFERENT action verb
   - Are factually grounded and realistic
   - Show transferable capabilities authentically
   - Use appropriate terminology for the actual industry
   - Maximum 25 words each

Return as JSON:
{"skills": ["skill1", "skill2", ...], "bullets": ["bullet 1", "bullet 2", ...]}"#;

// ────────────────────────────────────────────────────────────────────────────
// Step 4: per-project tailoring
// ────────────────────────────────────────────────────────────────────────────

pub const PROJECT_SYSTEM: &str = "You are an expert resume writer with strong analytical skills. \
Your job is to THINK STEP-BY-STEP before creating project content. CRITICAL RULES:
1. REASON about what the project ACTUALLY is based on its name
2. Don't fabricate completely different projects just to match keywords
3. Keep technologies and achievements REALISTIC for the project scope
4. Stay grounded in reality - no over-tailoring
5. If details don't make sense for the project, don't force them";

/// Replace: {name}, {description}, {required_skills}, {responsibilities}, {extra_context}
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"You are generating project details. Think step-by-step and reason carefully.

STEP 1: UNDERSTAND THE PROJECT
Project Name: {name}
Existing Description: {description}

Target Job Requirements:
- Required Skills: {required_skills}
- Key Responsibilities: {responsibilities}

Extra Context:
{extra_context}

STEP 2: REASON ABOUT WHAT MAKES SENSE
Before creating details, think through:
1. Based on the project NAME, what would this project ACTUALLY be about?
2. What technologies would REALISTICALLY be used for this type of project?
3. What achievements would be AUTHENTIC for this project scope?
4. Does the project align with the user's background?
5. Am I being realistic or over-tailoring?

STEP 3: GROUNDING CHECK
- Don't fabricate a completely different project just to match keywords
- Keep technologies realistic for the project type
- Don't claim involvement in systems/platforms that don't match the project name
- Achievements should be proportional to project scope

STEP 4: CREATE PROJECT CONTENT
Now create:
1. A brief, compelling description (2-3 sentences) that fits the project name
2. 4-6 technologies that are REALISTIC for this project type
3. 2-3 achievements that are AUTHENTIC and proportional
- Maximum 25 words per achievement

Return as JSON:
{"description": "description text", "technologies": ["tech1", "tech2", ...], "achievements": ["achievement 1", "achievement 2", ...]}"#;

// ────────────────────────────────────────────────────────────────────────────
// Step 5: skills section
// ────────────────────────────────────────────────────────────────────────────

pub const SKILLS_SYSTEM: &str =
    "You are an expert career counselor who creates compelling skills sections for resumes.";

/// Replace: {required_skills}, {responsibilities}, {culture_keywords},
///          {technical}, {languages}, {tools}, {soft_skills}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive skills section for a resume based on the target job description.

Job Description Analysis:
- Required Technical Skills: {required_skills}
- Key Responsibilities: {responsibilities}
- Industry Keywords: {culture_keywords}

User's Existing Skills (if any):
- Technical: {technical}
- Languages: {languages}
- Tools: {tools}
- Soft Skills: {soft_skills}

Create 3 categories of skills that would be most relevant for this job:

1. **Technical Skills**: 9 specific technical skills that match the job requirements. Include both required skills from the JD and complementary skills that demonstrate expertise.

2. **Languages & Frameworks**: 9 programming languages, frameworks, and technologies relevant to the role.

3. **Tools & Platforms**: 9 tools, platforms, and software that would be valuable for this position.

IMPORTANT:
- Focus on skills that directly match the job description
- Include both hard requirements and nice-to-have skills
- Use industry-standard terminology
- Prioritize skills mentioned or implied in the job description
- Include complementary skills that show breadth of knowledge
- Each category should have exactly 9 skills

Return as JSON:
{
    "technical": ["skill1", "skill2", "skill3", ...],
    "languages": ["language1", "language2", "language3", ...],
    "tools": ["tool1", "tool2", "tool3", ...]
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Story content (why-this-company statement, cover letter)
// ────────────────────────────────────────────────────────────────────────────

pub const STORY_SYSTEM: &str =
    "You are an expert career storyteller who writes authentic, tailored narratives.";

pub const WHY_REQUIREMENT: &str = "1. WHY_RESPONSE: A 3-paragraph narrative explaining why the candidate wants to work at the company, directly tying motivations from 'My Story' to the specific job description. Each paragraph should be 3-5 sentences, separated by blank lines.";

pub const COVER_LETTER_REQUIREMENT: &str = "2. COVER_LETTER: A full professional cover letter (4-5 paragraphs) tailored to the job description. Follow standard cover letter structure (introduction, value proposition, evidence, cultural fit, closing) and ensure tone is authentic to the story.";

/// Replace: {story}, {summary}, {experience_highlights}, {extra_knowledge},
///          {job_description}, {requirements}
pub const STORY_PROMPT_TEMPLATE: &str = r#"You are an expert career storyteller crafting personalised narratives that feel authentic and compelling.

CANDIDATE STORY (primary source material):
{story}

ADDITIONAL CONTEXT:
- Professional Summary (if provided): {summary}
- Experience Highlights:
{experience_highlights}
- Extra Knowledge: {extra_knowledge}

TARGET JOB DESCRIPTION:
{job_description}

OUTPUT REQUIREMENTS:
{requirements}

STRICT RULES:
- Root every paragraph in the candidate's story, motivations, and authentic experiences.
- Reference relevant elements from the job description (mission, responsibilities, skills) to show alignment.
- Use confident, professional tone without exaggeration or buzzwords.
- Ensure paragraphs are separated by a blank line for readability.
- Return ONLY valid JSON with keys for the requested outputs. Omit keys that were not requested.

Return JSON like:
{"why_you_want_to_work_here": "...", "cover_letter": "..."}"#;
