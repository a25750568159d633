//! Skill database: alias normalisation and category lookup.

use std::collections::{BTreeSet, HashMap};

/// Lower-case alias → canonical skill name.
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "JavaScript"),
    ("javascript", "JavaScript"),
    ("es6", "JavaScript"),
    ("es2015", "JavaScript"),
    ("ecmascript", "JavaScript"),
    ("ts", "TypeScript"),
    ("typescript", "TypeScript"),
    ("py", "Python"),
    ("python", "Python"),
    ("python3", "Python"),
    ("python2", "Python"),
    ("react", "React"),
    ("reactjs", "React"),
    ("react.js", "React"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("node.js", "Node.js"),
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mongo", "MongoDB"),
    ("mongodb", "MongoDB"),
    ("sql server", "SQL Server"),
    ("mssql", "SQL Server"),
    ("aws", "AWS"),
    ("amazon web services", "AWS"),
    ("azure", "Azure"),
    ("microsoft azure", "Azure"),
    ("gcp", "Google Cloud"),
    ("google cloud", "Google Cloud"),
    ("google cloud platform", "Google Cloud"),
    ("docker", "Docker"),
    ("containerization", "Docker"),
    ("k8s", "Kubernetes"),
    ("kubernetes", "Kubernetes"),
    ("c#", "C#"),
    ("csharp", "C#"),
    ("c sharp", "C#"),
    ("c++", "C++"),
    ("cpp", "C++"),
    (".net", ".NET"),
    ("dotnet", ".NET"),
    ("dot net", ".NET"),
    ("ml", "Machine Learning"),
    ("machine learning", "Machine Learning"),
    ("ai", "Artificial Intelligence"),
    ("artificial intelligence", "Artificial Intelligence"),
    ("dl", "Deep Learning"),
    ("deep learning", "Deep Learning"),
    ("nlp", "NLP"),
    ("natural language processing", "NLP"),
    ("tensorflow", "TensorFlow"),
    ("tf", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("torch", "PyTorch"),
    ("git", "Git"),
    ("github", "GitHub"),
    ("gitlab", "GitLab"),
    ("bitbucket", "Bitbucket"),
    ("ci/cd", "CI/CD"),
    ("cicd", "CI/CD"),
    ("continuous integration", "CI/CD"),
    ("jenkins", "Jenkins"),
    ("agile", "Agile"),
    ("scrum", "Scrum"),
    ("kanban", "Kanban"),
    ("angular", "Angular"),
    ("angularjs", "Angular"),
    ("vue", "Vue.js"),
    ("vuejs", "Vue.js"),
    ("vue.js", "Vue.js"),
    ("svelte", "Svelte"),
    ("nextjs", "Next.js"),
    ("next.js", "Next.js"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("fastapi", "FastAPI"),
    ("express", "Express.js"),
    ("expressjs", "Express.js"),
    ("spring", "Spring"),
    ("spring boot", "Spring Boot"),
    ("springboot", "Spring Boot"),
    ("react native", "React Native"),
    ("flutter", "Flutter"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("ios", "iOS Development"),
    ("android", "Android Development"),
    ("pandas", "Pandas"),
    ("numpy", "NumPy"),
    ("scipy", "SciPy"),
    ("scikit-learn", "Scikit-learn"),
    ("sklearn", "Scikit-learn"),
    ("matplotlib", "Matplotlib"),
    ("seaborn", "Seaborn"),
    ("spark", "Apache Spark"),
    ("apache spark", "Apache Spark"),
    ("hadoop", "Hadoop"),
    ("kafka", "Apache Kafka"),
    ("apache kafka", "Apache Kafka"),
    ("jest", "Jest"),
    ("mocha", "Mocha"),
    ("pytest", "pytest"),
    ("unittest", "unittest"),
    ("selenium", "Selenium"),
    ("cypress", "Cypress"),
    ("rest", "REST API"),
    ("restful", "REST API"),
    ("rest api", "REST API"),
    ("graphql", "GraphQL"),
    ("grpc", "gRPC"),
];

/// Category → canonical skill names.
const SKILL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming_languages",
        &[
            "JavaScript", "TypeScript", "Python", "Java", "C#", "C++", "C", "Go", "Rust", "Ruby",
            "PHP", "Swift", "Kotlin", "Scala", "R", "MATLAB", "Perl", "Haskell", "Elixir",
            "Clojure",
        ],
    ),
    (
        "frontend",
        &[
            "React", "Angular", "Vue.js", "Svelte", "Next.js", "HTML", "CSS", "Sass", "Less",
            "Tailwind CSS", "Bootstrap", "Material UI", "Redux", "MobX", "Webpack", "Vite",
            "jQuery",
        ],
    ),
    (
        "backend",
        &[
            "Node.js", "Django", "Flask", "FastAPI", "Express.js", "Spring", "Spring Boot",
            ".NET", "Ruby on Rails", "Laravel", "ASP.NET",
        ],
    ),
    (
        "databases",
        &[
            "PostgreSQL", "MySQL", "MongoDB", "Redis", "Elasticsearch", "SQL Server", "Oracle",
            "SQLite", "Cassandra", "DynamoDB", "Firebase", "Neo4j",
        ],
    ),
    (
        "cloud",
        &[
            "AWS", "Azure", "Google Cloud", "Heroku", "DigitalOcean", "Vercel", "Netlify",
            "Cloudflare",
        ],
    ),
    (
        "devops",
        &[
            "Docker", "Kubernetes", "CI/CD", "Jenkins", "GitHub Actions", "GitLab CI",
            "Terraform", "Ansible", "Linux", "Nginx", "Apache",
        ],
    ),
    (
        "data_science",
        &[
            "Machine Learning", "Deep Learning", "NLP", "TensorFlow", "PyTorch", "Keras",
            "Scikit-learn", "Pandas", "NumPy", "Data Analysis", "Statistics", "Computer Vision",
        ],
    ),
    (
        "mobile",
        &[
            "React Native", "Flutter", "iOS Development", "Android Development", "Swift",
            "Kotlin", "Xamarin",
        ],
    ),
    (
        "tools",
        &[
            "Git", "GitHub", "GitLab", "Bitbucket", "Jira", "Confluence", "Slack", "VS Code",
            "IntelliJ", "Postman", "Figma",
        ],
    ),
    (
        "soft_skills",
        &[
            "Leadership", "Communication", "Teamwork", "Problem Solving", "Critical Thinking",
            "Time Management", "Agile", "Scrum", "Project Management", "Mentoring",
        ],
    ),
    (
        "testing",
        &[
            "Jest", "Mocha", "pytest", "Selenium", "Cypress", "JUnit", "TestNG", "Unit Testing",
            "Integration Testing", "E2E Testing", "TDD", "BDD",
        ],
    ),
];

const CORE_CATEGORIES: &[&str] = &[
    "programming_languages",
    "frontend",
    "backend",
    "databases",
    "data_science",
];

const TOOL_CATEGORIES: &[&str] = &["tools", "devops", "testing"];

/// In-memory skill vocabulary. Cheap to query, built once.
#[derive(Debug)]
pub struct SkillDatabase {
    aliases: HashMap<&'static str, &'static str>,
    /// lower-case canonical name → canonical name
    canonical: HashMap<String, &'static str>,
}

impl SkillDatabase {
    pub fn new() -> Self {
        let aliases: HashMap<&'static str, &'static str> = SKILL_ALIASES.iter().copied().collect();

        let canonical = SKILL_CATEGORIES
            .iter()
            .flat_map(|(_, skills)| skills.iter().copied())
            .chain(aliases.values().copied())
            .map(|skill| (skill.to_lowercase(), skill))
            .collect();

        Self { aliases, canonical }
    }

    /// Maps an alias or a known skill (any case) to its canonical name.
    /// Unknown skills are title-cased.
    pub fn normalize(&self, skill: &str) -> String {
        let lower = skill.trim().to_lowercase();
        if let Some(canonical) = self.aliases.get(lower.as_str()) {
            return canonical.to_string();
        }
        if let Some(canonical) = self.canonical.get(&lower) {
            return canonical.to_string();
        }
        title_case(skill.trim())
    }

    /// First category containing the normalised skill, in declaration order.
    pub fn category(&self, skill: &str) -> Option<&'static str> {
        let normalized = self.normalize(skill);
        SKILL_CATEGORIES
            .iter()
            .find(|(_, skills)| skills.contains(&normalized.as_str()))
            .map(|(category, _)| *category)
    }

    pub fn is_core_skill(&self, skill: &str) -> bool {
        self.category(skill)
            .is_some_and(|c| CORE_CATEGORIES.contains(&c))
    }

    pub fn is_tool(&self, skill: &str) -> bool {
        self.category(skill)
            .is_some_and(|c| TOOL_CATEGORIES.contains(&c))
    }

    /// Every lower-case term the extractor should look for: aliases plus
    /// canonical names.
    pub fn search_terms(&self) -> BTreeSet<String> {
        self.aliases
            .keys()
            .map(|alias| alias.to_string())
            .chain(self.canonical.keys().cloned())
            .collect()
    }
}

impl Default for SkillDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
