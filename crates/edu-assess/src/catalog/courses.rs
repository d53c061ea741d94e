use super::{Course, CourseCategory, CourseLevel};

fn course(
    id: &str,
    title: &str,
    description: &str,
    level: CourseLevel,
    category: CourseCategory,
    duration: &str,
    topics: &[&str],
    prerequisites: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        level,
        category,
        duration: duration.to_string(),
        topics: topics.iter().map(|topic| topic.to_string()).collect(),
        prerequisites: prerequisites
            .iter()
            .map(|prerequisite| prerequisite.to_string())
            .collect(),
    }
}

/// The ten courses the platform ships with.
pub(super) fn standard_courses() -> Vec<Course> {
    vec![
        course(
            "1",
            "HTML and CSS Fundamentals",
            "Learn the foundations of web development with HTML5 and CSS3. Perfect for newcomers.",
            CourseLevel::Beginner,
            CourseCategory::Frontend,
            "4 weeks",
            &["HTML5", "CSS3", "Flexbox", "Grid", "Responsive Design"],
            &["None"],
        ),
        course(
            "2",
            "Modern JavaScript (ES6+)",
            "Master JavaScript from the basics through advanced concepts like async/await and modules.",
            CourseLevel::Beginner,
            CourseCategory::Frontend,
            "6 weeks",
            &[
                "Variables",
                "Functions",
                "Arrays",
                "Objects",
                "DOM",
                "ES6+",
                "Async/Await",
            ],
            &["Basic HTML", "Basic CSS"],
        ),
        course(
            "3",
            "Introduction to React.js",
            "Build dynamic user interfaces with React, the most popular JavaScript library.",
            CourseLevel::Intermediate,
            CourseCategory::Frontend,
            "8 weeks",
            &[
                "Components",
                "JSX",
                "Props",
                "State",
                "Hooks",
                "Router",
                "Context",
            ],
            &["Intermediate JavaScript", "HTML", "CSS"],
        ),
        course(
            "4",
            "Backend Development with Node.js",
            "Build robust APIs and web servers with Node.js and Express.",
            CourseLevel::Intermediate,
            CourseCategory::Backend,
            "6 weeks",
            &[
                "Node.js",
                "Express",
                "REST APIs",
                "Middleware",
                "Databases",
                "Authentication",
            ],
            &["Intermediate JavaScript"],
        ),
        course(
            "5",
            "Databases and SQL",
            "Learn to design, create, and manage relational databases with SQL.",
            CourseLevel::Beginner,
            CourseCategory::Backend,
            "4 weeks",
            &[
                "SQL",
                "MySQL",
                "Schema Design",
                "Queries",
                "Normalization",
                "Indexes",
            ],
            &["Basic programming concepts"],
        ),
        course(
            "6",
            "Full Stack Development",
            "Combine frontend and backend skills to build complete web applications.",
            CourseLevel::Advanced,
            CourseCategory::Fullstack,
            "12 weeks",
            &[
                "React",
                "Node.js",
                "Express",
                "MongoDB",
                "JWT",
                "Deployment",
                "Testing",
            ],
            &["Intermediate React", "Basic Node.js"],
        ),
        course(
            "7",
            "Advanced CSS and Frameworks",
            "Go deeper into CSS with animations, transforms, and frameworks like Tailwind.",
            CourseLevel::Intermediate,
            CourseCategory::Frontend,
            "5 weeks",
            &[
                "CSS Grid",
                "Advanced Flexbox",
                "Animations",
                "Sass",
                "Tailwind CSS",
                "Styled Components",
            ],
            &["Basic CSS", "Intermediate HTML"],
        ),
        course(
            "8",
            "Introduction to Web Development",
            "Introductory course covering every basic concept of web development.",
            CourseLevel::Beginner,
            CourseCategory::Frontend,
            "3 weeks",
            &[
                "The Internet",
                "Browsers",
                "Basic HTML",
                "Basic CSS",
                "Basic JavaScript",
            ],
            &["None"],
        ),
        course(
            "9",
            "Algorithms and Data Structures",
            "Strengthen your programming skills with fundamental algorithms.",
            CourseLevel::Advanced,
            CourseCategory::Backend,
            "8 weeks",
            &[
                "Arrays",
                "Linked Lists",
                "Stacks",
                "Queues",
                "Trees",
                "Sorting",
                "Searching",
            ],
            &["Intermediate JavaScript", "Basic programming"],
        ),
        course(
            "10",
            "TypeScript for JavaScript Developers",
            "Add static typing to your JavaScript projects with TypeScript.",
            CourseLevel::Intermediate,
            CourseCategory::Frontend,
            "4 weeks",
            &[
                "Types",
                "Interfaces",
                "Generics",
                "Decorators",
                "Modules",
                "Configuration",
            ],
            &["Advanced JavaScript"],
        ),
    ]
}
