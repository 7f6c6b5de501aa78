//! Placeholder content used when no agent backend is involved.

use crate::domain::model::{GenerationRequest, GenerationResponse, ModuleResult};
use std::collections::BTreeMap;

const BRAINSTORM: &str = r#"# 💡 Creative Brainstorm

## Core Concept
**{prompt}**

### Key Ideas
1. **AI-Powered Core**: leverage machine learning to deliver personalized experiences
2. **Modular Architecture**: build once, deploy anywhere with plug-and-play modules
3. **Community-First**: foster organic growth through user-generated content
4. **Data Flywheel**: each interaction improves the product for everyone
5. **Freemium Gateway**: free tier drives adoption, premium unlocks full power

### Unique Value Proposition
The first platform that combines {prompt_lower} with intelligent automation, reducing manual effort by 80% while increasing output quality.

### Innovation Angles
- Integration with existing workflows (Slack, Notion, etc.)
- Real-time collaboration features
- AI-assisted decision making
- Predictive analytics dashboard"#;

const BUSINESS_PLAN: &str = r#"# 📋 Business Plan

## Executive Summary
**{prompt}**

A next-generation platform targeting a $4.2B addressable market with 23% YoY growth.

## Market Opportunity
- TAM: $4.2B (2024)
- SAM: $890M
- SOM: $45M (Year 3)

## Revenue Model
| Tier | Price | Target |
|------|-------|--------|
| Free | $0/mo | Individual users |
| Pro | $29/mo | Power users |
| Business | $99/mo | Teams |
| Enterprise | Custom | Organizations |

## Roadmap
- **Q1**: MVP launch, 500 beta users
- **Q2**: Pro tier launch, 2K users
- **Q3**: Business tier, partnerships
- **Q4**: Enterprise features, 10K users

## Financial Projections
- Year 1: $120K ARR
- Year 2: $580K ARR
- Year 3: $2.1M ARR"#;

const MARKET_RESEARCH: &str = r#"# 📊 Market Research

## Industry Analysis
The {prompt_lower} market is experiencing rapid growth driven by AI adoption.

### Market Size
- Global market: $4.2B (2024)
- Expected CAGR: 23.1% through 2028
- Key growth driver: Enterprise AI adoption

### Competitive Landscape
| Competitor | Strength | Weakness |
|-----------|----------|----------|
| Incumbent A | Brand recognition | Slow innovation |
| Startup B | Modern UX | Limited features |
| Startup C | Low price | Poor support |
| **You** | AI-native + modular | New entrant |

### Target Segments
1. **Early Adopters** (15%): Tech-savvy professionals
2. **Main Market** (60%): Business teams
3. **Late Majority** (25%): Traditional enterprises

### Key Trends
- AI-first workflows replacing manual processes
- No-code/low-code platforms gaining traction
- Consolidation of point solutions into platforms"#;

const BUSINESS_ADVICE: &str = r#"# 🧠 Strategic Advice

## Top Recommendations

### 1. Start Narrow, Expand Wide
Focus on ONE killer use case first. Master one workflow, then expand.

### 2. Build in Public
Share your journey on social channels. This builds trust and creates early adopters at zero cost.

### 3. Pricing Strategy
Start with a generous free tier. Your goal in Year 1 is USERS, not revenue. Monetize in Year 2.

### 4. Technical Moat
Invest in proprietary models trained on your specific domain data. This creates a defensible advantage.

### 5. Distribution
- Partner with complementary tools (integrations)
- Create a template marketplace
- Invest in SEO-driven content marketing"#;

const APP_BLUEPRINT: &str = r#"# 🏗️ App Blueprint

## Architecture Overview

```
┌─────────────┐     ┌──────────────┐     ┌─────────────┐
│   Frontend   │────▶│   API Layer  │────▶│  AI Engine   │
│   (Web UI)   │◀────│    (Rust)    │◀────│   (Agents)   │
└─────────────┘     └──────────────┘     └─────────────┘
                           │                      │
                    ┌──────▼──────┐        ┌──────▼──────┐
                    │  Database    │        │  Storage     │
                    │ (PostgreSQL) │        │  (S3/R2)     │
                    └─────────────┘        └─────────────┘
```

## Tech Stack
- **Frontend**: single-page app + TypeScript
- **Backend**: Rust API service
- **AI**: hosted agents
- **Database**: PostgreSQL
- **Deploy**: container platform

## Key Features
1. Prompt-based concept generation
2. Modular output selection
3. Real-time generation progress
4. Export to PDF/Markdown
5. Save & share concepts"#;

const CODE_SCRIPTS: &str = r#"# 💻 Code Scripts

## Core Generation Engine

```typescript
// concept-engine.ts
interface ConceptConfig {
  prompt: string
  modules: string[]
}

export class ConceptEngine {
  constructor(private client: AgentClient) {}

  async generate(config: ConceptConfig) {
    const results = await Promise.allSettled(
      config.modules.map(mod =>
        this.client.runAgent({ agentId: MODULE_AGENTS[mod], inputs: { prompt: config.prompt, module: mod } })
      )
    )

    return results.map((r, i) => ({
      module: config.modules[i],
      status: r.status,
      data: r.status === 'fulfilled' ? r.value : r.reason,
    }))
  }
}
```"#;

const UI_UX: &str = r#"# 🎨 UI/UX Design Specifications

## Design System

### Colors
- Background: `#0a0a14` (deep space)
- Cards: `#121220` (elevated surface)
- Accent: `#8b5cf6` (electric purple)
- Success: `#34d399` (emerald)
- Text: `#e4e4ed` (soft white)

### Typography
- Headings: Inter Bold
- Body: Inter Regular
- Code: JetBrains Mono

### User Flow
1. Landing → Enter prompt
2. Select modules (toggle cards)
3. Optional: fill preferences
4. Click Generate → progress view
5. Results → tabbed module outputs
6. Export / Share / Save

### Key Screens
- **Dashboard**: Clean prompt input with module cards
- **Generation**: Animated progress with module status
- **Results**: Tab-based output viewer with copy/export
- **History**: Saved concepts gallery"#;

const MOCKUPS: &str = r#"# 🖼️ Visual Mockups

*AI-generated concept visualizations would appear here*

## Mockup Descriptions

### 1. Hero Landing Screen
Dark gradient background with centered prompt input, floating module cards arranged in a grid, subtle purple glow effects.

### 2. Generation Progress
Full-screen dark view with animated module cards showing completion status, progress bars, and real-time text streaming.

### 3. Results Dashboard
Split view: left sidebar with module tabs, right panel showing rich formatted output with charts, code blocks, and images.

### 4. Mobile View
Stacked layout with swipeable module cards and bottom sheet results viewer.

> 🎨 *Connect an image generation agent to produce actual mockup images*"#;

const BRANDING: &str = r#"# ✨ Brand Identity

## Brand Name
**Concept Studio**

## Tagline Options
1. "From idea to reality, powered by AI"
2. "Think it. Build it. Launch it."
3. "Your AI concept partner"

## Brand Colors
- Primary: `#8b5cf6` (Electric Purple)
- Secondary: `#6366f1` (Indigo)
- Accent: `#34d399` (Emerald)
- Dark: `#0a0a14` (Deep Space)

## Logo Concept
Minimal "CS" monogram in electric purple with a subtle spark integrated into the S.

## Brand Voice
- Confident but approachable
- Technical but clear
- Innovative but grounded

## Usage Guidelines
- Always use on dark backgrounds
- Minimum size: 32px height
- Clear space: 1x logo height on all sides"#;

const AI_SUGGESTIONS: &str = r#"# 🤖 AI-Powered Suggestions

## Additional Opportunities

### 1. Template Marketplace
Create pre-built concept templates users can customize. Revenue share with template creators.

### 2. Collaboration Features
Real-time co-creation. Multiple users refine concepts together.

### 3. Concept Versioning
Git-like version control for concepts. Branch, compare, and merge different directions.

### 4. Integration Hub
- Export to Notion, Confluence
- Push code to GitHub
- Send plans to project management tools
- Share mockups to Figma

### 5. AI Refinement Loop
Allow users to give feedback on generated outputs. AI refines iteratively.

### 6. Analytics Dashboard
Track which concept types perform best, industry trends, and user behavior patterns."#;

fn template_for(module_id: &str) -> Option<&'static str> {
    let template = match module_id {
        "brainstorm" => BRAINSTORM,
        "business_plan" => BUSINESS_PLAN,
        "market_research" => MARKET_RESEARCH,
        "business_advice" => BUSINESS_ADVICE,
        "app_blueprint" => APP_BLUEPRINT,
        "code_scripts" => CODE_SCRIPTS,
        "ui_ux" => UI_UX,
        "mockups" => MOCKUPS,
        "branding" => BRANDING,
        "ai_suggestions" => AI_SUGGESTIONS,
        _ => return None,
    };
    Some(template)
}

/// Deterministic placeholder markdown for a module.
pub fn demo_content(module_id: &str, prompt: &str) -> String {
    match template_for(module_id) {
        Some(template) => template
            .replace("{prompt_lower}", &prompt.to_lowercase())
            .replace("{prompt}", prompt),
        None => format!(
            "# {id}\n\nContent for {id} module based on: {prompt}",
            id = module_id,
            prompt = prompt
        ),
    }
}

/// Short notice the proxy returns when it has no backend credentials.
pub fn demo_notice(module_id: &str, prompt: &str) -> String {
    format!(
        "[Demo Mode] Generated {} content for: {}. Configure AUTOGPT_API_KEY to enable real generation.",
        module_id, prompt
    )
}

pub const DEMO_MODE_MESSAGE: &str =
    "Running in demo mode. Set AUTOGPT_API_KEY environment variable for real AI generation.";

/// Every requested module completed with `content_for(id, prompt)`.
pub fn demo_response(
    request: &GenerationRequest,
    execution_id: String,
    content_for: fn(&str, &str) -> String,
) -> GenerationResponse {
    let modules: BTreeMap<String, ModuleResult> = request
        .modules
        .iter()
        .map(|id| {
            (
                id.clone(),
                ModuleResult::completed(content_for(id, &request.prompt)),
            )
        })
        .collect();

    GenerationResponse {
        success: true,
        execution_id,
        modules,
        message: None,
    }
}
