pub mod history;
pub mod profile;
pub mod resume;

pub use history::HistoryEntry;
pub use profile::{Education, Experience, PersonalInfo, Profile, Project};
pub use resume::{JobAnalysis, SkillsSection, StoryContent, TailoredResume};
