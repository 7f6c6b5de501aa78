use crate::domain::model::{Category, Module};

pub static MODULES: [Module; 10] = [
    Module {
        id: "brainstorm",
        label: "Creative Brainstorm",
        icon: "💡",
        description: "Generate innovative concepts and ideas",
        category: Category::Creative,
    },
    Module {
        id: "business_plan",
        label: "Business Plan",
        icon: "📋",
        description: "Complete business plan with roadmap",
        category: Category::Strategy,
    },
    Module {
        id: "market_research",
        label: "Market Research",
        icon: "📊",
        description: "Market analysis, competitors & trends",
        category: Category::Strategy,
    },
    Module {
        id: "business_advice",
        label: "Business Advice",
        icon: "🧠",
        description: "Strategic recommendations & insights",
        category: Category::Strategy,
    },
    Module {
        id: "app_blueprint",
        label: "App Blueprint",
        icon: "🏗️",
        description: "Technical architecture & specifications",
        category: Category::Technical,
    },
    Module {
        id: "code_scripts",
        label: "Code Scripts",
        icon: "💻",
        description: "Working code snippets & boilerplate",
        category: Category::Technical,
    },
    Module {
        id: "ui_ux",
        label: "UI/UX Design",
        icon: "🎨",
        description: "Interface wireframes & UX flows",
        category: Category::Visual,
    },
    Module {
        id: "mockups",
        label: "Visual Mockups",
        icon: "🖼️",
        description: "AI-generated concept images",
        category: Category::Visual,
    },
    Module {
        id: "branding",
        label: "Logo & Branding",
        icon: "✨",
        description: "Brand identity & logo concepts",
        category: Category::Visual,
    },
    Module {
        id: "ai_suggestions",
        label: "AI Suggestions",
        icon: "🤖",
        description: "Additional AI-powered recommendations",
        category: Category::Creative,
    },
];

pub fn find_module(id: &str) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.id == id)
}

pub fn is_known_module(id: &str) -> bool {
    find_module(id).is_some()
}
