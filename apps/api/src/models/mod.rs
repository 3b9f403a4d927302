pub mod profile;

pub use profile::{ContactInfo, EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile};
