//! Static portfolio records.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub tagline: String,
    pub research: String,
    pub seeking: String,
    pub email: String,
    pub linkedin: String,
    pub resume_href: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectDetails {
    pub model: Option<String>,
    pub toolchain: Option<String>,
    pub app: Option<String>,
    pub tech_integration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    pub number: String,
    pub title: String,
    pub description: String,
    pub achievements: Option<Vec<String>>,
    pub tech: Vec<String>,
    pub link: Option<String>,
    pub full_description: Option<String>,
    pub image: Option<String>,
    pub details: Option<ProjectDetails>,
    pub demo_link: Option<String>,
    pub github_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub date: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Content {
    pub profile: Profile,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillCategory>,
    pub education: Vec<Education>,
}

impl Content {
    pub fn project(&self, number: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.number == number)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn placeholder_details() -> ProjectDetails {
    ProjectDetails {
        model: Some("-".into()),
        toolchain: Some("-".into()),
        app: Some("-".into()),
        tech_integration: Some("-".into()),
    }
}

impl Content {
    pub fn portfolio() -> Self {
        Self {
            profile: Profile {
                name: "JAINAM MEHTA".into(),
                headline: "Aeronautics & Astronautics Engineer, Specialization: Structures".into(),
                tagline: "Description • - @ UW •".into(),
                research: "Research Name".into(),
                seeking: "Software Engineering opportunities for 2026".into(),
                email: "jainam@uw.edu".into(),
                linkedin: "https://www.linkedin.com/in/jainammehta23/".into(),
                resume_href: "./resume.pdf".into(),
            },
            experience: vec![
                Experience {
                    title: "Teaching Assistant".into(),
                    company: "University of Washington".into(),
                    date: "Mar 2025 – June 2025".into(),
                    description: "Advanced Composite Structural Analysis (AE 553)".into(),
                    achievements: strings(&[
                        "Guided a class of 40+ students in building layered shell and cohesive-zone FEA models in OptiStruct.",
                        "Taught simulation-to-failure workflows and post-processing, improving model setup quality and convergence.",
                        "Hands on mentorship of 20 term projects with technical feedback, increasing performance of the class by 15%.",
                    ]),
                },
                Experience {
                    title: "Teaching Assistant".into(),
                    company: "University of Washington".into(),
                    date: "Sept 2024 – Mar 2025".into(),
                    description: "Mechanics of Composite Materials (AE 550)".into(),
                    achievements: strings(&[
                        "Delivered weekly review sessions on micromechanics, anisotropic elasticity, and composite failure theories for 60+ students.",
                        "Provided support for simulation-based and created coding tutorials for students.",
                        "Collaborated with faculty and led personal office hours to reinforce basic understanding of composite mechanics.",
                    ]),
                },
                Experience {
                    title: "Grader".into(),
                    company: "University of Washington".into(),
                    date: "Mar 2024 – June 2024".into(),
                    description: "Aerospace Structures 2 (AA 332)".into(),
                    achievements: strings(&[
                        "Evaluated problem sets and exams for 90+ students across topics like beam theory, stress analysis.",
                        "Provided detailed annotations and review suggestions that helped students correct conceptual errors.",
                        "Collaborated with the instructor to standardize grading rubrics and improve turnaround time.",
                    ]),
                },
                Experience {
                    title: "Research & Development Intern".into(),
                    company: "European Perfume Works, U.A.E.".into(),
                    date: "Mar 2024 – June 2024".into(),
                    description: "Aerospace Structures 2 (AA 332)".into(),
                    achievements: strings(&[
                        "Created engineering drawings and inspection documentation for high-volume components using AutoCAD.",
                        "Redesigned jig components with improved material selection, increasing durability and reducing wear by 21%.",
                        "Investigated failure trends in bottle capping systems and proposed fixture modifications, reducing production waste by 9%.",
                    ]),
                },
            ],
            projects: vec![
                Project {
                    number: "001".into(),
                    title: "Multiscale Optimization of Weav3D Lattice-Reinforced Composites".into(),
                    description: "Master's Thesis".into(),
                    achievements: Some(strings(&[
                        "Developed automated multiscale optimization workflow integrating homogenization to evaluate 100+ designs.",
                        "Applied surrogate modeling techniques to enable efficient design optimization across large parameter spaces.",
                        "Developed Python scripts to parameterize geometry and post process results, reducing analysis time by 60%",
                        "Reduced baseline composite panel mass by 20% through optimization while meeting strain constraints",
                    ])),
                    tech: strings(&["Python", "FEA", "Optimization", "Composite Materials", "MATLAB"]),
                    full_description: Some("-".into()),
                    details: Some(placeholder_details()),
                    ..Default::default()
                },
                Project {
                    number: "002".into(),
                    title: "Comparative Study of Different Drone Structures".into(),
                    description: "Senior Design Project".into(),
                    achievements: Some(strings(&[
                        "Designed and simulated multirotor UAV drone frames using ANSYS and Fluent to compare performance and mass.",
                        "Assembled and tested prototypes using 3D printing and integrated microcontrollers with sensors for real-time data acquisition.",
                        "Conducted 20+ iterative flight tests and structural tweaks, achieving an 18% gain in endurance and efficiency.",
                    ])),
                    tech: strings(&[
                        "Python",
                        "TensorFlow",
                        "CNN",
                        "Edge Impulse",
                        "Streamlit",
                        "Audio Processing",
                    ]),
                    full_description: Some("-".into()),
                    image: Some("/projects/hearme.png".into()),
                    details: Some(placeholder_details()),
                    demo_link: Some("link".into()),
                    github_link: Some("link".into()),
                    ..Default::default()
                },
            ],
            skills: vec![
                SkillCategory {
                    category: "Languages".into(),
                    skills: strings(&["JavaScript", "TypeScript", "Python", "Java", "SQL", "HTML/CSS"]),
                },
                SkillCategory {
                    category: "Frontend".into(),
                    skills: strings(&[
                        "React",
                        "Next.js",
                        "THREE.js",
                        "Tailwind CSS",
                        "Responsive Design",
                        "UI/UX",
                    ]),
                },
                SkillCategory {
                    category: "Backend & Tools".into(),
                    skills: strings(&["Node.js", "REST APIs", "PostgreSQL", "MongoDB", "Git", "Docker"]),
                },
                SkillCategory {
                    category: "AI & Research".into(),
                    skills: strings(&[
                        "PyTorch",
                        "Machine Learning",
                        "Computer Vision",
                        "GRU/LSTM",
                        "Attention Mechanisms",
                    ]),
                },
            ],
            education: vec![
                Education {
                    degree: "Master of Science in Aeronautics & Astronautics | Specialization: Structures".into(),
                    school: "University of Washington".into(),
                    date: "Sept 2023 – Aug 2025".into(),
                    details: "Fracture Mechanics, Finite Element Analysis, Solid Mechanics, Compressible Fluid Dynamics, Dynamical Systems & Chaos.".into(),
                },
                Education {
                    degree: "Bachelor of Science in Mechanical Engineering | Specialization: Machine Design".into(),
                    school: "Manipal University, Dubai".into(),
                    date: "Sept 2019 – June 2023".into(),
                    details: "CAD/CAM, Mechanical Design, Python Programming, Heat Transfer, DFMEA, Turbo Machines.".into(),
                },
            ],
        }
    }
}
