//! README templates, project info and snippet builders.
//!
//! Field values are interpolated as-is. A value containing markdown syntax
//! is rendered as markdown by both preview paths.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which starter template to load.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Basic,
    Advanced,
}

impl TemplateKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }

    /// Render this template for the given project.
    pub fn render(self, info: &ProjectInfo) -> String {
        match self {
            Self::Basic => basic(info),
            Self::Advanced => advanced(info),
        }
    }
}

/// Values substituted into the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub title: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub license: String,
    pub language: String,
    pub repo_url: String,
    pub demo_url: String,
    pub contact: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            title: "README Studio".to_string(),
            description: "A terminal tool for writing README.md files with a live styled \
                          preview, starter templates and HTML export."
                .to_string(),
            author: "your-name".to_string(),
            version: "1.0.0".to_string(),
            license: "MIT".to_string(),
            language: "Rust".to_string(),
            repo_url: String::new(),
            demo_url: String::new(),
            contact: String::new(),
        }
    }
}

/// Form labels and field accessors, in display order.
pub const PROJECT_FIELDS: [(&str, &str); 9] = [
    ("title", "Project Title"),
    ("description", "Description"),
    ("author", "Author"),
    ("version", "Version"),
    ("license", "License"),
    ("language", "Main Language"),
    ("repo_url", "Repository URL"),
    ("demo_url", "Demo URL"),
    ("contact", "Contact Info"),
];

impl ProjectInfo {
    /// Load project info from a JSON file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project info {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse project info {}", path.display()))
    }

    pub fn field(&self, key: &str) -> &str {
        match key {
            "title" => &self.title,
            "description" => &self.description,
            "author" => &self.author,
            "version" => &self.version,
            "license" => &self.license,
            "language" => &self.language,
            "repo_url" => &self.repo_url,
            "demo_url" => &self.demo_url,
            "contact" => &self.contact,
            _ => "",
        }
    }

    pub fn set_field(&mut self, key: &str, value: String) {
        match key {
            "title" => self.title = value,
            "description" => self.description = value,
            "author" => self.author = value,
            "version" => self.version = value,
            "license" => self.license = value,
            "language" => self.language = value,
            "repo_url" => self.repo_url = value,
            "demo_url" => self.demo_url = value,
            "contact" => self.contact = value,
            _ => {}
        }
    }

    /// Repository slug: lowercased title with spaces as dashes.
    pub fn slug(&self) -> String {
        self.title.to_lowercase().replace(' ', "-")
    }
}

pub fn basic(info: &ProjectInfo) -> String {
    let slug = info.slug();
    format!(
        "# {title}

{description}

## Installation

```bash
git clone https://github.com/{author}/{slug}.git
cd {slug}
```

## Usage

Describe how to use your project here.

## Contributing

Contributions are welcome! Please feel free to submit a Pull Request.

## License

This project is licensed under the {license} License.

## Author

**{author}**
",
        title = info.title,
        description = info.description,
        author = info.author,
        license = info.license,
    )
}

pub fn advanced(info: &ProjectInfo) -> String {
    let slug = info.slug();
    let contact = if info.contact.is_empty() {
        "Add your contact information here"
    } else {
        info.contact.as_str()
    };
    format!(
        "# {title}

![Version](https://img.shields.io/badge/version-{version}-blue.svg)
![License](https://img.shields.io/badge/license-{license}-green.svg)
![Language](https://img.shields.io/badge/language-{language}-orange.svg)

{description}

## 🚀 Features

- Feature 1
- Feature 2
- Feature 3

## 📋 Table of Contents

- [Installation](#installation)
- [Usage](#usage)
- [API Reference](#api-reference)
- [Examples](#examples)
- [Contributing](#contributing)
- [License](#license)
- [Contact](#contact)

## 💻 Installation

### Prerequisites

- List any prerequisites here

### Install

```bash
git clone https://github.com/{author}/{slug}.git
cd {slug}
# Add installation commands here
```

## 🔧 Usage

### Basic Usage

```python
# Add code examples here
```

### Advanced Usage

```python
# Add more complex examples here
```

## 📚 API Reference

### Class/Function Name

Description of what it does.

**Parameters:**
- `param1` (type): Description
- `param2` (type): Description

**Returns:**
- `type`: Description

**Example:**
```python
# Example usage
```

## 🎯 Examples

### Example 1: Basic Example

```python
# Code example
```

### Example 2: Advanced Example

```python
# Advanced code example
```

## 🤝 Contributing

Contributions, issues, and feature requests are welcome!

1. Fork the Project
2. Create your Feature Branch (`git checkout -b feature/AmazingFeature`)
3. Commit your Changes (`git commit -m 'Add some AmazingFeature'`)
4. Push to the Branch (`git push origin feature/AmazingFeature`)
5. Open a Pull Request

## 📝 License

This project is licensed under the {license} License - see the [LICENSE](LICENSE) file for details.

## 👤 Author

**{author}**

- GitHub: [@{author}](https://github.com/{author})

## 📞 Contact

{contact}

## ⭐ Show your support

Give a ⭐ if this project helped you!
",
        title = info.title,
        version = info.version,
        license = info.license,
        language = info.language,
        description = info.description,
        author = info.author,
    )
}

/// Build a shields.io badge image link.
///
/// Empty fields (after trimming) fall back to `label`, `message` and `blue`.
pub fn badge(label: &str, message: &str, color: &str) -> String {
    let label = non_empty_or(label, "label");
    let message = non_empty_or(message, "message");
    let color = non_empty_or(color, "blue");
    format!("![{label}](https://img.shields.io/badge/{label}-{message}-{color}.svg)")
}

/// A 3x2 markdown table, surrounded by newlines.
pub const fn table_snippet() -> &'static str {
    "
| Column 1 | Column 2 | Column 3 |
|----------|----------|----------|
| Row 1    | Data     | Data     |
| Row 2    | Data     | Data     |
"
}

/// A fenced code block with an optional language tag, surrounded by newlines.
pub fn code_block_snippet(language: &str) -> String {
    format!("\n```{}\n# Your code here\n```\n", language.trim())
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
