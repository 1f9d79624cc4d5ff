//! Static page content.  Pure data; the document layout decides where it
//! goes and how tall it is.

#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug)]
pub struct Profile {
    pub name: &'static str,
    pub tagline: &'static str,
    pub location: &'static str,
    pub links: &'static [Link],
    pub resume: Link,
}

#[derive(Debug)]
pub struct Education {
    pub school: &'static str,
    pub degree: &'static str,
    pub years: &'static str,
    pub clubs: &'static str,
    pub coursework: &'static [&'static str],
}

#[derive(Debug)]
pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
    pub links: &'static [Link],
}

#[derive(Debug)]
pub struct AwardTab {
    pub title: &'static str,
    pub entries: &'static [&'static str],
}

#[derive(Debug)]
pub struct Contact {
    pub blurb: &'static str,
    pub channels: &'static [Link],
    pub form_fields: &'static [&'static str],
}

#[derive(Debug)]
pub struct Content {
    pub profile: Profile,
    pub about: &'static [&'static str],
    pub skills: &'static [&'static str],
    pub interests: &'static [&'static str],
    pub education: Education,
    pub projects: &'static [Project],
    pub awards: &'static [AwardTab],
    pub contact: Contact,
    pub footer_links: &'static [Link],
}

pub static CONTENT: Content = Content {
    profile: Profile {
        name: "Avery Quinn",
        tagline: "CS & Math student working on machine learning, robotics and systems",
        location: "Palo Alto, California",
        links: &[
            Link { label: "GitHub", url: "https://github.com/averyquinn" },
            Link { label: "LinkedIn", url: "https://www.linkedin.com/in/averyquinn" },
            Link { label: "Email", url: "mailto:avery@example.edu" },
        ],
        resume: Link { label: "Resume", url: "https://example.edu/~avery/resume.pdf" },
    },
    about: &[
        "I study Computer Science and Mathematics and spend most of my research time on \
         decision support with language models.",
        "Before that I worked on deep learning for drug discovery, which ended up as a \
         workshop paper and a science fair run I am still proud of.",
        "Outside of class I co-host a STEM + arts podcast, read philosophy, lift and write poetry.",
    ],
    skills: &["Python", "Rust", "C++", "Java", "R", "Julia", "React", "Git", "LaTeX", "Linux", "SQL"],
    interests: &[
        "Machine Learning",
        "Computer Vision",
        "Natural Language Processing",
        "Healthcare AI",
        "Drug Discovery",
    ],
    education: Education {
        school: "Example University",
        degree: "Computer Science and Mathematics",
        years: "2024 - 2028",
        clubs: "Directed Reading Program, Association for Computing Machinery",
        coursework: &[
            "Programming Abstractions",
            "Linear Algebra and Differential Calculus",
            "Probability for Computer Scientists",
            "Mathematical Foundations of Computing",
            "Ordinary Differential Equations",
            "Infrastructure at Scale",
        ],
    },
    projects: &[
        Project {
            title: "Monco - Drug Discovery Pipeline",
            summary: "Graph neural network pipeline that ranks candidate molecules against a \
                      protein target and explains its picks.",
            tags: &["PyTorch", "GNN", "Bioinformatics"],
            links: &[Link { label: "Paper", url: "https://example.org/monco.pdf" }],
        },
        Project {
            title: "Zeus - Low Latency Computer Agent",
            summary: "An LLM desktop agent that plans through accessibility APIs instead of \
                      screenshots to keep response times low.",
            tags: &["LLM", "Agents", "Accessibility"],
            links: &[Link { label: "Code", url: "https://github.com/averyquinn/zeus" }],
        },
        Project {
            title: "Bayesian Risk Assessment",
            summary: "Hierarchical Bayesian model for patient risk with calibrated \
                      uncertainty, served behind a small web front end.",
            tags: &["Stan", "Statistics", "Healthcare"],
            links: &[],
        },
        Project {
            title: "Fairness in Vision & Robotics",
            summary: "Audit of demographic bias in grasp detection models and a re-weighting \
                      scheme that narrows the gap.",
            tags: &["Computer Vision", "Robotics", "Fairness"],
            links: &[Link { label: "Report", url: "https://example.org/fairness.pdf" }],
        },
    ],
    awards: &[
        AwardTab {
            title: "Research",
            entries: &[
                "Oral presentation at a machine learning in drug discovery symposium",
                "Workshop paper at a data science for social good workshop",
                "3rd place grand award, international science fair, computational biology",
                "1st place, state science and engineering fair",
                "Selected as one of 50 world science scholars",
            ],
        },
        AwardTab {
            title: "Technical",
            entries: &[
                "Directed reading program in mathematics (10 weeks)",
                "2nd place, national data science and analytics competition",
                "3rd place, regional cybersecurity competition",
            ],
        },
        AwardTab {
            title: "Recognition",
            entries: &[
                "Featured in national press for the STEM + arts podcast",
                "City recognition for mental health advocacy",
                "Writing prize nominee for legal writing",
            ],
        },
    ],
    contact: Contact {
        blurb: "I am always open to new projects, research opportunities or collaborations. \
                Reach out through any of these:",
        channels: &[
            Link { label: "Email", url: "avery@example.edu" },
            Link { label: "LinkedIn", url: "linkedin.com/in/averyquinn" },
            Link { label: "GitHub", url: "github.com/averyquinn" },
        ],
        form_fields: &["Name", "Email", "Subject", "Message"],
    },
    footer_links: &[
        Link { label: "GitHub", url: "https://github.com/averyquinn" },
        Link { label: "LinkedIn", url: "https://www.linkedin.com/in/averyquinn" },
        Link { label: "Email", url: "mailto:avery@example.edu" },
    ],
};
