//! Static page content. Nothing here is user data.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub screenshot: &'static str,
    pub live_link: Option<&'static str>,
    pub source_link: Option<&'static str>,
    pub tech: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TechItem {
    pub name: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExperienceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Experience {
    pub id: ExperienceId,
    pub company: &'static str,
    pub role: &'static str,
    pub duration: &'static str,
    pub responsibilities: &'static [&'static str],
    pub projects: &'static [&'static str],
    pub technologies: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub accent: &'static str,
    pub glyph: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavSection {
    pub id: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

pub const HERO_GREETING: &str = "Hi, I'm ";

pub const ABOUT: &str = "I'm a software developer with a strong passion for building efficient, \
scalable, and user-friendly applications. With experience across both frontend and backend \
technologies, I enjoy crafting clean code and solving complex problems. My work spans from \
developing dynamic web interfaces to designing robust APIs and integrating third-party \
services. I'm always eager to learn new tools and frameworks, and I thrive in collaborative \
and fast-paced environments.";

pub const HOME_SECTION: &str = "home-section";
pub const PROJECTS_SECTION: &str = "projects-section";
pub const EXPERIENCE_SECTION: &str = "experience-section";
pub const CONNECT_SECTION: &str = "connect-section";

pub const NAV_SECTIONS: &[NavSection] = &[
    NavSection {
        id: HOME_SECTION,
        label: "Home",
        glyph: "⌂",
    },
    NavSection {
        id: PROJECTS_SECTION,
        label: "Projects",
        glyph: "▦",
    },
    NavSection {
        id: EXPERIENCE_SECTION,
        label: "Experience",
        glyph: "☰",
    },
    NavSection {
        id: CONNECT_SECTION,
        label: "Connect",
        glyph: "✉",
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        name: "Portfolio Website",
        description: "A modern portfolio website with smooth animations and transitions, and a \
            light mode for low-powered devices.",
        screenshot: "/images/projects/portfolio.jpg",
        live_link: Some("https://portfolio.example.com"),
        source_link: Some("https://github.com/anonlegionoke/portfolio"),
        tech: &["Rust", "Yew", "WebAssembly", "CSS"],
    },
    Project {
        id: 2,
        name: "E-commerce Platform",
        description: "A full-featured e-commerce platform with product catalog, cart \
            functionality, and payment integration.",
        screenshot: "/images/projects/ecommerce.jpg",
        live_link: Some("https://ecommerce.example.com"),
        source_link: Some("https://github.com/anonlegionoke/ecommerce"),
        tech: &["React", "Node.js", "MongoDB", "Express", "Stripe API"],
    },
    Project {
        id: 3,
        name: "Weather Dashboard",
        description: "Real-time weather application with location-based forecasts and \
            interactive visualizations.",
        screenshot: "/images/projects/weather.jpg",
        live_link: Some("https://weather.example.com"),
        source_link: None,
        tech: &["JavaScript", "React", "OpenWeather API", "Chart.js", "CSS3"],
    },
];

pub const TECH_STACK: &[TechItem] = &[
    TechItem { name: "JavaScript", icon: "/icons/javascript.svg", accent: "#F7DF1E" },
    TechItem { name: "TypeScript", icon: "/icons/typescript.svg", accent: "#3178C6" },
    TechItem { name: "React", icon: "/icons/react.svg", accent: "#61DAFB" },
    TechItem { name: "Next.js", icon: "/icons/nextjs.svg", accent: "#000000" },
    TechItem { name: "Node.js", icon: "/icons/nodejs.svg", accent: "#339933" },
    TechItem { name: "Python", icon: "/icons/python.svg", accent: "#3776AB" },
    TechItem { name: "Java", icon: "/icons/java.svg", accent: "#007396" },
    TechItem { name: "HTML5", icon: "/icons/html5.svg", accent: "#E34F26" },
    TechItem { name: "CSS3", icon: "/icons/css3.svg", accent: "#1572B6" },
    TechItem { name: "Tailwind CSS", icon: "/icons/tailwindcss.svg", accent: "#06B6D4" },
    TechItem { name: "MongoDB", icon: "/icons/mongodb.svg", accent: "#47A248" },
    TechItem { name: "PostgreSQL", icon: "/icons/postgresql.svg", accent: "#4169E1" },
    TechItem { name: "Docker", icon: "/icons/docker.svg", accent: "#2496ED" },
    TechItem { name: "Git", icon: "/icons/git.svg", accent: "#F05032" },
    TechItem { name: "AWS", icon: "/icons/aws.svg", accent: "#232F3E" },
];

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        id: ExperienceId(1),
        company: "Tech Innovations Inc.",
        role: "Senior Frontend Developer",
        duration: "Jan 2023 - Present",
        responsibilities: &[
            "Led the development of the company's flagship product using React and TypeScript",
            "Improved application performance by 40% through code optimization and lazy loading",
            "Mentored junior developers and conducted code reviews",
        ],
        projects: &[
            "Customer Dashboard Redesign",
            "Analytics Platform",
            "Mobile App Integration",
        ],
        technologies: &["React", "TypeScript", "Next.js", "Tailwind CSS", "GraphQL"],
    },
    Experience {
        id: ExperienceId(2),
        company: "Digital Solutions Ltd.",
        role: "Frontend Developer",
        duration: "Mar 2021 - Dec 2022",
        responsibilities: &[
            "Developed responsive web applications using modern JavaScript frameworks",
            "Collaborated with UX/UI designers to implement pixel-perfect interfaces",
            "Integrated RESTful APIs and implemented state management solutions",
        ],
        projects: &[
            "E-commerce Platform",
            "Content Management System",
            "Customer Portal",
        ],
        technologies: &["JavaScript", "React", "Redux", "SASS", "REST APIs"],
    },
    Experience {
        id: ExperienceId(3),
        company: "WebCraft Studios",
        role: "Junior Web Developer",
        duration: "Jun 2019 - Feb 2021",
        responsibilities: &[
            "Built and maintained client websites using HTML, CSS, and JavaScript",
            "Implemented responsive designs and ensured cross-browser compatibility",
            "Worked with WordPress and custom PHP solutions",
        ],
        projects: &["Corporate Website Redesigns", "Portfolio Sites", "Landing Pages"],
        technologies: &["HTML", "CSS", "JavaScript", "WordPress", "PHP"],
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "LinkedIn",
        url: "https://linkedin.com/in/sabirpm",
        accent: "#0077B5",
        glyph: "in",
    },
    SocialLink {
        name: "GitHub",
        url: "https://github.com/anonlegionoke",
        accent: "#020202",
        glyph: "gh",
    },
    SocialLink {
        name: "Email",
        url: "mailto:smrazind@gmail.com",
        accent: "#D44638",
        glyph: "@",
    },
    SocialLink {
        name: "Twitter/X",
        url: "https://x.com/sabirpm_",
        accent: "#1DA1F2",
        glyph: "X",
    },
    SocialLink {
        name: "LeetCode",
        url: "https://leetcode.com/anonlegio",
        accent: "#FFA116",
        glyph: "LC",
    },
    SocialLink {
        name: "Discord",
        url: "https://discord.gg/JWcAFxZ5",
        accent: "#5865f2",
        glyph: "dc",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn experience_ids_are_unique() {
        let ids: HashSet<_> = EXPERIENCE.iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), EXPERIENCE.len());
    }

    #[test]
    fn accents_are_hex_colours() {
        let accents = TECH_STACK
            .iter()
            .map(|item| item.accent)
            .chain(SOCIAL_LINKS.iter().map(|link| link.accent));

        for accent in accents {
            assert_eq!(accent.len(), 7, "{accent}");
            assert!(accent.starts_with('#'));
            assert!(accent[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
