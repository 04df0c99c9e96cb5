//! Markup for each section of the page. Record fields are interpolated as-is.

use crate::page::content::{Content, Education, Experience, Project, SkillCategory};

const CARD_ACHIEVEMENTS: usize = 3;
const CARD_TECH_TAGS: usize = 4;

fn list_items<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", item.as_ref()))
        .collect()
}

fn tags<S: AsRef<str>>(class: &str, items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!(r#"<span class="{}">{}</span>"#, class, item.as_ref()))
        .collect()
}

fn section_header(anchor: &str, number: &str, title: &str) -> String {
    format!(
        r#"<div id="{anchor}" class="section-header"><span class="section-number">{number}</span><h2 class="section-title">{title}</h2><div class="section-line"></div></div>"#
    )
}

pub fn experience_item(exp: &Experience) -> String {
    let achievements: Vec<&str> = exp
        .achievements
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    format!(
        r#"<div class="experience-item"><div class="exp-header"><div><div class="exp-title">{}</div><div class="exp-company">{}</div></div><div class="exp-date">{}</div></div><p class="exp-description">{}</p><ul class="exp-achievements">{}</ul></div>"#,
        exp.title,
        exp.company,
        exp.date,
        exp.description,
        list_items(&achievements)
    )
}

pub fn project_card(project: &Project) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="project-card"><div class="project-number">PROJECT {}</div><h3>{}</h3><p class="project-description">{}</p>"#,
        project.number, project.title, project.description
    ));

    if let Some(achievements) = &project.achievements {
        let shown = &achievements[..achievements.len().min(CARD_ACHIEVEMENTS)];
        html.push_str(r#"<ul class="project-achievements">"#);
        html.push_str(&list_items(shown));
        if achievements.len() > CARD_ACHIEVEMENTS {
            html.push_str(r#"<li class="more-achievements">...</li>"#);
        }
        html.push_str("</ul>");
    }

    let shown = &project.tech[..project.tech.len().min(CARD_TECH_TAGS)];
    html.push_str(r#"<div class="project-tech">"#);
    html.push_str(&tags("tech-tag", shown));
    if project.tech.len() > CARD_TECH_TAGS {
        html.push_str(&format!(
            r#"<span class="tech-tag">+{} more</span>"#,
            project.tech.len() - CARD_TECH_TAGS
        ));
    }
    html.push_str("</div>");

    html.push_str(&format!(
        r#"<button class="read-more-btn" data-project="{}">Read More →</button></div>"#,
        project.number
    ));
    html
}

pub fn skill_category(category: &SkillCategory) -> String {
    format!(
        r#"<div class="skill-category"><h3>{}</h3><div class="skill-tags">{}</div></div>"#,
        category.category,
        tags("skill-tag", &category.skills)
    )
}

pub fn education_item(edu: &Education) -> String {
    format!(
        r#"<div class="education-item"><div class="edu-header"><div><div class="edu-degree">{}</div><div class="edu-school">{}</div></div><div class="edu-date">{}</div></div><p class="edu-details">{}</p></div>"#,
        edu.degree, edu.school, edu.date, edu.details
    )
}

pub fn main_view(content: &Content) -> String {
    let profile = &content.profile;
    let mut html = String::from(r#"<div class="main-container">"#);

    html.push_str(&format!(
        r##"<section id="home" class="hero"><h1 class="glitch">{}</h1><div class="subtitle">{}</div><p class="tagline">{}</p><p><span class="highlight">{}</span></p><div class="cta-buttons"><a href="#projects" class="btn">EXPLORE PROJECTS</a><a href="#contact" class="btn">GET IN TOUCH</a></div></section>"##,
        profile.name, profile.headline, profile.tagline, profile.research
    ));

    html.push_str(&section_header("experience", "01", "EXPERIENCE"));
    html.push_str(r#"<div id="experience-container" class="experience-timeline">"#);
    content
        .experience
        .iter()
        .for_each(|exp| html.push_str(&experience_item(exp)));
    html.push_str("</div>");

    html.push_str(&section_header("projects", "02", "PROJECTS"));
    html.push_str(r#"<div id="projects-container" class="projects-grid">"#);
    content
        .projects
        .iter()
        .for_each(|project| html.push_str(&project_card(project)));
    html.push_str("</div>");

    html.push_str(&section_header("skills", "03", "SKILLS"));
    html.push_str(r#"<div id="skills-container" class="skills-categories">"#);
    content
        .skills
        .iter()
        .for_each(|category| html.push_str(&skill_category(category)));
    html.push_str("</div>");

    html.push_str(&section_header("education", "04", "EDUCATION"));
    html.push_str(r#"<div id="education-container" class="education-list">"#);
    content
        .education
        .iter()
        .for_each(|edu| html.push_str(&education_item(edu)));
    html.push_str("</div>");

    html.push_str(&section_header("resume", "05", "RESUME"));
    html.push_str(&format!(
        r#"<div class="resume-section"><div class="resume-content"><div class="resume-icon">📄</div><h3>Download My Resume</h3><p>Get a comprehensive overview of my experience, skills, and education.</p><a href="{}" class="resume-btn">Download Resume (PDF)</a></div></div>"#,
        profile.resume_href
    ));
    html.push_str("</div>");

    html.push_str(&format!(
        r#"<footer id="contact" class="footer"><div class="footer-content"><h2 class="footer-title">LET'S CONNECT</h2><p class="footer-seeking">Currently seeking <span class="highlight">{}</span></p><div class="footer-links"><a href="mailto:{email}" class="footer-link"><span class="footer-icon">📧</span><span>{email}</span></a><a href="{}" target="_blank" class="footer-link"><span class="footer-icon">💼</span><span>LinkedIn</span></a></div></div></footer>"#,
        profile.seeking,
        profile.linkedin,
        email = profile.email
    ));

    html
}

fn detail_section(title: &str, body: &str) -> String {
    format!(
        r#"<div class="project-detail-section"><h2 class="detail-section-title">{}</h2>{}</div>"#,
        title, body
    )
}

fn detail_item(label: &str, value: &Option<String>) -> String {
    value
        .as_ref()
        .map(|value| {
            format!(
                r#"<div class="detail-item"><div class="detail-label">{}:</div><div class="detail-value">{}</div></div>"#,
                label, value
            )
        })
        .unwrap_or_default()
}

fn detail_link(href: &Option<String>, text: &str) -> String {
    href.as_ref()
        .map(|href| {
            format!(
                r#"<a href="{}" target="_blank" class="detail-link-btn">{}</a>"#,
                href, text
            )
        })
        .unwrap_or_default()
}

pub fn project_detail(project: &Project) -> String {
    let mut html = String::from(r#"<div class="project-detail-container">"#);
    html.push_str(r#"<button class="back-button" id="back-to-projects">← Back to Projects</button>"#);

    html.push_str(&format!(
        r#"<div class="project-detail-header"><div class="project-detail-number">PROJECT {}</div><h1 class="project-detail-title">{}</h1><p class="project-detail-subtitle">{}</p></div>"#,
        project.number, project.title, project.description
    ));

    if let Some(image) = &project.image {
        html.push_str(&format!(
            r#"<div class="project-detail-image"><img src="{}" alt="{}"></div>"#,
            image, project.title
        ));
    }

    if let Some(overview) = &project.full_description {
        html.push_str(&detail_section(
            "Overview",
            &format!(r#"<p class="detail-section-text">{}</p>"#, overview),
        ));
    }

    if let Some(achievements) = &project.achievements {
        html.push_str(&detail_section(
            "Key Achievements",
            &format!(r#"<ul class="detail-achievements">{}</ul>"#, list_items(achievements)),
        ));
    }

    if let Some(details) = &project.details {
        let grid = [
            detail_item("Model", &details.model),
            detail_item("Toolchain", &details.toolchain),
            detail_item("App", &details.app),
            detail_item("Tech Integration", &details.tech_integration),
        ]
        .concat();
        html.push_str(&detail_section(
            "Technical Details",
            &format!(r#"<div class="detail-grid">{}</div>"#, grid),
        ));
    }

    html.push_str(&detail_section(
        "Technologies Used",
        &format!(
            r#"<div class="detail-tech-tags">{}</div>"#,
            tags("tech-tag", &project.tech)
        ),
    ));

    if project.demo_link.is_some() || project.github_link.is_some() || project.link.is_some() {
        let links = [
            detail_link(&project.demo_link, "View Demo"),
            detail_link(&project.github_link, "GitHub Repository"),
            detail_link(&project.link, "View Project"),
        ]
        .concat();
        html.push_str(&detail_section(
            "Links",
            &format!(r#"<div class="detail-links">{}</div>"#, links),
        ));
    }

    html.push_str(
        r#"<button class="back-button bottom" id="back-to-projects-bottom">← Back to Projects</button>"#,
    );
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(achievements: usize, tech: usize) -> Project {
        Project {
            number: "007".into(),
            title: "Probe".into(),
            description: "Test".into(),
            achievements: Some((0..achievements).map(|i| format!("a{}", i)).collect()),
            tech: (0..tech).map(|i| format!("t{}", i)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn card_truncates_achievements_and_tech() {
        let html = project_card(&project(5, 6));
        assert!(html.contains("<li>a2</li>"));
        assert!(!html.contains("<li>a3</li>"));
        assert!(html.contains(r#"<li class="more-achievements">...</li>"#));
        assert!(html.contains(r#"<span class="tech-tag">t3</span>"#));
        assert!(!html.contains(r#"<span class="tech-tag">t4</span>"#));
        assert!(html.contains(r#"<span class="tech-tag">+2 more</span>"#));
        assert!(html.contains(r#"data-project="007""#));
    }

    #[test]
    fn short_card_has_no_overflow_markers() {
        let html = project_card(&project(3, 4));
        assert!(!html.contains("more-achievements"));
        assert!(!html.contains("more</span>"));

        let html = project_card(&Project {
            achievements: None,
            ..project(0, 1)
        });
        assert!(!html.contains("project-achievements"));
    }

    #[test]
    fn detail_skips_missing_sections() {
        let html = project_detail(&project(1, 1));
        assert!(html.contains("Key Achievements"));
        assert!(html.contains("Technologies Used"));
        assert!(!html.contains("Overview"));
        assert!(!html.contains("Technical Details"));
        assert!(!html.contains("project-detail-image"));
        assert!(!html.contains("detail-links"));
        assert_eq!(html.matches("back-button").count(), 2);
    }

    #[test]
    fn detail_renders_present_fields_only() {
        let html = project_detail(&Project {
            github_link: Some("https://example.com/repo".into()),
            details: Some(crate::page::content::ProjectDetails {
                toolchain: Some("cargo".into()),
                ..Default::default()
            }),
            ..project(0, 0)
        });
        assert!(html.contains("GitHub Repository"));
        assert!(!html.contains("View Demo"));
        assert!(html.contains(r#"<div class="detail-value">cargo</div>"#));
        assert!(!html.contains("Model:"));
    }

    #[test]
    fn blank_experience_achievements_are_skipped() {
        let html = experience_item(&Experience {
            achievements: vec!["one".into(), "  ".into()],
            ..Default::default()
        });
        assert_eq!(html.matches("<li>").count(), 1);
    }

    #[test]
    fn main_view_numbers_sections() {
        let html = main_view(&Content::portfolio());
        for (number, title) in [
            ("01", "EXPERIENCE"),
            ("02", "PROJECTS"),
            ("03", "SKILLS"),
            ("04", "EDUCATION"),
            ("05", "RESUME"),
        ] {
            assert!(html.contains(&format!(
                r#"<span class="section-number">{}</span><h2 class="section-title">{}</h2>"#,
                number, title
            )));
        }
        assert_eq!(html.matches(r#"class="project-card""#).count(), 2);
        assert_eq!(html.matches(r#"class="skill-category""#).count(), 4);
        assert_eq!(html.matches(r#"class="education-item""#).count(), 2);
        assert!(html.contains(r#"id="contact""#));
    }

    #[test]
    fn main_view_fills_hero_resume_and_footer() {
        let content = Content::portfolio();
        let profile = &content.profile;
        let html = main_view(&content);

        assert!(html.contains(&format!(r#"<h1 class="glitch">{}</h1>"#, profile.name)));
        assert!(html.contains(&format!(
            r#"<a href="{}" class="resume-btn">"#,
            profile.resume_href
        )));
        assert!(html.contains(&format!(r#"href="mailto:{}""#, profile.email)));
        assert!(html.contains(&format!("<span>{}</span>", profile.email)));
        assert!(html.contains(&format!(r#"<a href="{}" target="_blank""#, profile.linkedin)));
        assert!(html.ends_with("</footer>"));
    }
}
