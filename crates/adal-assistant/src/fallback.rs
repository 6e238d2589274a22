//! Network-free fallback responder.
//!
//! Used whenever the hosted completion endpoint is unconfigured or fails.
//! The question is lowercased and matched against [`RULES`] in order; the
//! first rule with a keyword contained in the question wins. Questions that
//! match nothing get [`general_reply`], which echoes the original text.

use adal_types::Usage;

/// Usage reported for fallback replies. Nothing is actually counted.
pub const FALLBACK_USAGE: Usage = Usage {
    input_tokens: 50,
    output_tokens: 200,
};

/// Which canned answer a question was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Community,
    Greeting,
    Programming,
    AiMl,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Community => "community",
            Topic::Greeting => "greeting",
            Topic::Programming => "programming",
            Topic::AiMl => "ai_ml",
            Topic::General => "general",
        }
    }
}

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: Topic,
    /// Lowercase substrings; any one of them selects this rule.
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Keyword table in priority order.
pub const RULES: &[Rule] = &[
    Rule {
        topic: Topic::Community,
        keywords: &["ai community", "important", "community"],
        template: COMMUNITY,
    },
    Rule {
        topic: Topic::Greeting,
        keywords: &["hello", "hi", "hey"],
        template: GREETING,
    },
    Rule {
        topic: Topic::Programming,
        keywords: &["code", "program", "debug", "javascript", "python"],
        template: PROGRAMMING,
    },
    Rule {
        topic: Topic::AiMl,
        keywords: &["ai", "machine learning", "neural", "model"],
        template: AI_ML,
    },
];

/// The keyword table, for callers that want to inspect the priority order.
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Return the first rule whose keywords occur in `question`, ignoring case.
pub fn matching_rule(question: &str) -> Option<&'static Rule> {
    let lowered = question.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&lowered))
}

pub fn classify(question: &str) -> Topic {
    matching_rule(question)
        .map(|rule| rule.topic)
        .unwrap_or(Topic::General)
}

/// Produce the canned reply for `question`. Never fails.
pub fn respond(question: &str) -> String {
    match matching_rule(question) {
        Some(rule) => rule.template.to_owned(),
        None => general_reply(question),
    }
}

/// Catch-all reply that quotes the question back verbatim.
pub fn general_reply(question: &str) -> String {
    format!(
        "🤖 **Great Question!**

I understand you're asking about: \"{question}\"

While I'm designed to be helpful with a wide range of topics, I can provide insights on:

• **AI/ML concepts** and technologies
• **Programming** and software development
• **Adal platform** features and navigation
• **General knowledge** across many domains
• **Problem-solving** and creative thinking

Could you rephrase your question or ask about something specific? I'm here to help! 😊"
    )
}

// ── Templates ────────────────────────────────────────────────────────────────

pub const COMMUNITY: &str = "🌟 **AI Communities are EXTREMELY Important!**

AI communities like Adal are crucial because they:

**🤝 Collaboration & Knowledge Sharing**
• Bring together researchers, developers, and enthusiasts
• Share cutting-edge research and breakthroughs
• Accelerate innovation through collective intelligence

**🚀 Democratizing AI**
• Make advanced AI accessible to everyone
• Provide free/open-source models and datasets
• Lower barriers to entry for AI development

**💡 Innovation Hub**
• Foster new ideas and approaches
• Enable rapid prototyping and experimentation
• Create the next generation of AI applications

**🌍 Global Impact**
• Solve real-world problems through AI
• Bridge the gap between research and application
• Build a more intelligent and connected world

**Adal specifically** hosts 100k+ models and 200k+ datasets, making it a powerhouse for AI innovation! 🎯

The community aspect is what makes AI truly transformative - it's not just about the technology, but about people working together to build the future! ✨";

pub const GREETING: &str = "👋 **Hello! I'm Adal AI Assistant!**

I'm here to help you with anything you need! I can assist with:

• **AI/ML questions** - Models, datasets, algorithms
• **Programming help** - Code, debugging, best practices
• **Adal platform** - Navigation, features, how-tos
• **General knowledge** - Any topic you're curious about
• **Creative tasks** - Writing, brainstorming, problem-solving

What would you like to know? I'm ready to help! 😊";

pub const PROGRAMMING: &str = "💻 **Programming Help Available!**

I can help you with:

• **Languages**: Python, JavaScript, React, Node.js, etc.
• **Concepts**: Algorithms, data structures, design patterns
• **Debugging**: Error fixing, code optimization
• **Best Practices**: Clean code, testing, architecture
• **Frameworks**: Web development, mobile apps, AI/ML

Just ask me about any programming topic! 🚀";

pub const AI_ML: &str = "🤖 **AI/ML Expertise Ready!**

I can explain:

• **Machine Learning**: Algorithms, models, training
• **Deep Learning**: Neural networks, CNNs, RNNs
• **Data Science**: Analysis, visualization, statistics
• **AI Models**: LLMs, transformers, embeddings
• **Applications**: NLP, computer vision, robotics

Ask me anything about AI and machine learning! 🧠";

// ── Tests ────────────────────────────────────────────────────────────────────
