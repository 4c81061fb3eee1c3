use crate::models::cv::{CvDocument, Education, Experience, Project};

/// The document a fresh editor starts from.
pub fn initial_document() -> CvDocument {
    CvDocument {
        name: "Your Name".to_string(),
        email: "your.email@example.com".to_string(),
        phone: "+1 234 567 890".to_string(),
        linkedin: "linkedin.com/in/yourprofile".to_string(),
        summary: "A brief professional summary about yourself, highlighting your key skills and career goals.".to_string(),
        skills: ["React", "TypeScript", "Tailwind CSS", "Node.js"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        experience: vec![Experience {
            id: 1,
            title: "Frontend Developer".to_string(),
            company: "Tech Corp".to_string(),
            start_date: "2022-01".to_string(),
            end_date: "Present".to_string(),
            description: "Developed and maintained web applications using modern technologies."
                .to_string(),
        }],
        education: vec![Education {
            id: 1,
            degree: "B.Sc. in Computer Science".to_string(),
            university: "State University".to_string(),
            start_date: "2018-09".to_string(),
            end_date: "2022-05".to_string(),
        }],
        projects: vec![Project {
            id: 1,
            name: "AI Job Portal".to_string(),
            description: "A responsive job portal with CV generation capabilities.".to_string(),
            link: "github.com/your/repo".to_string(),
        }],
    }
}
