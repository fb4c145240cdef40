//! Threat-intelligence scenario catalog and prompt builders.
//!
//! Every analysis request has a [`ScenarioType`] and a free-text scenario
//! (usually one of the built-in catalog entries). From those two values the
//! builders produce:
//!
//! - a verbose, hand-written [`detailed_prompt`]
//! - a hand-shortened [`compact_prompt`] run through the rule compressor
//! - a [`reduced_prompt`]: the detailed prompt cut down by the context reducer
//! - the relevance [`query`] used to rank prompt chunks

use crate::compress::{ContextReducer, Reduction, compress_prompt};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character budget used for reduced prompts.
pub const DEFAULT_REDUCED_CHARS: usize = 200;

/// Guidance appended to compact prompts.
pub const GUIDANCE_SUFFIX: &str = "\n\nINTELLIGENT APPROACH: Use targeted MCP queries. \
    Avoid bulk data retrieval. Start specific, expand only if needed.";

/// Instruction appended to task descriptions for token-hungry analyses.
pub const TOKEN_LIMIT_INSTRUCTIONS: &str = "\n\nCRITICAL TOKEN LIMIT: You must stay under \
    150,000 total tokens. Use ONLY 3-5 most relevant techniques. Use targeted searches, \
    not bulk data retrieval. Focus on quality over quantity.";

/// Kind of threat-intelligence analysis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ScenarioType {
    /// Profile a threat actor group.
    ThreatActorProfiling,
    /// Analyze a malware family or tool.
    MalwareAnalysis,
    /// Investigate a named campaign.
    CampaignInvestigation,
    /// Build an ATT&CK Navigator layer.
    NavigatorLayerGeneration,
    /// Compare actors, malware, campaigns or sectors.
    ComparativeAnalysis,
}

impl ScenarioType {
    /// All scenario types in catalog order.
    pub const ALL: [Self; 5] = [
        Self::ThreatActorProfiling,
        Self::MalwareAnalysis,
        Self::CampaignInvestigation,
        Self::NavigatorLayerGeneration,
        Self::ComparativeAnalysis,
    ];

    /// Returns the snake_case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThreatActorProfiling => "threat_actor_profiling",
            Self::MalwareAnalysis => "malware_analysis",
            Self::CampaignInvestigation => "campaign_investigation",
            Self::NavigatorLayerGeneration => "navigator_layer_generation",
            Self::ComparativeAnalysis => "comparative_analysis",
        }
    }

    /// Returns a human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ThreatActorProfiling => "Threat Actor Profiling",
            Self::MalwareAnalysis => "Malware Analysis",
            Self::CampaignInvestigation => "Campaign Investigation",
            Self::NavigatorLayerGeneration => "Navigator Layer Generation",
            Self::ComparativeAnalysis => "Comparative Analysis",
        }
    }

    /// Returns the built-in scenarios of this type.
    #[must_use]
    pub const fn scenarios(self) -> &'static [&'static str] {
        match self {
            Self::ThreatActorProfiling => THREAT_ACTORS,
            Self::MalwareAnalysis => MALWARE,
            Self::CampaignInvestigation => CAMPAIGNS,
            Self::NavigatorLayerGeneration => NAVIGATOR_LAYERS,
            Self::ComparativeAnalysis => COMPARISONS,
        }
    }

    /// Returns the built-in scenario at `index`.
    #[must_use]
    pub fn scenario(self, index: usize) -> Option<&'static str> {
        self.scenarios().get(index).copied()
    }

    /// Returns true if task descriptions of this type carry
    /// [`TOKEN_LIMIT_INSTRUCTIONS`].
    #[must_use]
    pub const fn needs_token_limit(self) -> bool {
        matches!(self, Self::MalwareAnalysis | Self::NavigatorLayerGeneration)
    }
}

impl fmt::Display for ScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const THREAT_ACTORS: &[&str] = &[
    "APT29 (Cozy Bear) - Russian state-sponsored group targeting government and healthcare sectors",
    "Lazarus Group - North Korean threat actor known for cryptocurrency theft and destructive attacks",
    "FIN8 - Financially motivated group targeting point-of-sale systems in retail and hospitality",
    "APT1 (Comment Crew) - Chinese military unit 61398 targeting intellectual property",
    "Carbanak - Financially motivated group targeting banks and financial institutions",
    "Wizard Spider - Russian cybercriminal group behind TrickBot and Conti ransomware",
    "TA505 - Russian threat actor distributing banking trojans and ransomware",
    "APT28 (Fancy Bear) - Russian military intelligence targeting government and defense",
    "Maze Ransomware Group - Financially motivated ransomware-as-a-service operation",
    "REvil (Sodinokibi) - Russian ransomware group targeting high-value organizations",
];

const MALWARE: &[&str] = &[
    "TrickBot - Banking trojan evolved into modular malware platform",
    "Emotet - Banking trojan and botnet used for credential theft and malware distribution",
    "Ryuk Ransomware - Targeted ransomware used in high-impact attacks",
    "Cobalt Strike - Commercial penetration testing tool abused by threat actors",
    "Mimikatz - Credential dumping tool used for lateral movement",
    "PowerShell Empire - Post-exploitation framework for persistence and lateral movement",
    "QakBot (Qbot) - Banking trojan and botnet for credential theft",
    "IcedID - Banking trojan used as initial access vector for ransomware",
    "BazarLoader - Malware loader used to deploy ransomware",
    "Conti Ransomware - Ransomware-as-a-service targeting critical infrastructure",
];

const CAMPAIGNS: &[&str] = &[
    "SolarWinds Supply Chain Attack - Russian APT29 campaign targeting government and tech companies",
    "Colonial Pipeline Ransomware Attack - DarkSide ransomware targeting critical infrastructure",
    "Kaseya VSA Supply Chain Attack - REvil ransomware targeting MSPs and their customers",
    "Microsoft Exchange Server Hafnium Campaign - Chinese APT targeting email servers",
    "NotPetya Cyber Attack - Russian military operation targeting Ukraine with global impact",
    "WannaCry Ransomware Campaign - North Korean Lazarus Group targeting healthcare and government",
    "ShadowPad Backdoor Campaign - Chinese APT targeting software supply chains",
    "Olympic Destroyer - Russian operation targeting Winter Olympics infrastructure",
    "Triton/Trisis - Iranian APT targeting industrial control systems",
    "CloudHopper Campaign - Chinese APT targeting managed service providers",
];

const NAVIGATOR_LAYERS: &[&str] = &[
    "Create layer for healthcare sector threats - Focus on ransomware and data theft",
    "Generate financial sector threat layer - Banking trojans and fraud techniques",
    "Build energy sector attack layer - ICS/SCADA targeting and critical infrastructure",
    "Create government sector threat layer - APT techniques and espionage",
    "Generate education sector layer - Ransomware and data breach techniques",
    "Build manufacturing sector layer - Supply chain and industrial targeting",
    "Create retail sector threat layer - POS malware and payment card theft",
    "Generate technology sector layer - Supply chain and intellectual property theft",
    "Build transportation sector layer - Critical infrastructure and operational disruption",
    "Create defense contractor layer - Advanced persistent threats and espionage",
];

const COMPARISONS: &[&str] = &[
    "Compare APT29 vs APT28 - Russian state-sponsored groups and their techniques",
    "Analyze TrickBot vs Emotet - Banking trojans and their evolution",
    "Compare Ryuk vs Conti - Ransomware groups and their targeting",
    "Analyze Lazarus vs Carbanak - North Korean vs Russian threat actors",
    "Compare Maze vs REvil - Ransomware-as-a-service operations",
    "Analyze FIN8 vs TA505 - Financially motivated Russian groups",
    "Compare SolarWinds vs Kaseya - Supply chain attack campaigns",
    "Analyze WannaCry vs NotPetya - Destructive malware campaigns",
    "Compare healthcare vs financial targeting - Sector-specific attack patterns",
    "Analyze government vs critical infrastructure - State-sponsored targeting",
];

/// Builds the verbose analysis prompt.
#[must_use]
pub fn detailed_prompt(scenario_type: ScenarioType, scenario: &str) -> String {
    match scenario_type {
        ScenarioType::ThreatActorProfiling => format!(
            "Analyze the threat actor group: {scenario}\n\n\
             Provide comprehensive intelligence including:\n\
             - Group aliases, attribution, and evolution timeline\n\
             - Complete TTP analysis mapped to MITRE ATT&CK techniques\n\
             - Associated malware, tools, and software used\n\
             - Campaigns attributed to this group\n\
             - Target sectors, platforms, and organizations\n\
             - Attack patterns and methodology\n\
             - Defensive recommendations and mitigations\n\
             - Risk assessment and threat landscape positioning"
        ),
        ScenarioType::MalwareAnalysis => format!(
            "Conduct detailed analysis of the malware: {scenario}\n\n\
             Provide comprehensive malware intelligence including:\n\
             - Malware family overview, variants, and evolution\n\
             - Capabilities, functionality, and attack vectors\n\
             - MITRE ATT&CK technique mapping and procedures\n\
             - Target platforms, operating systems, and applications\n\
             - Associated threat actor groups and campaigns\n\
             - Detection signatures and behavioral indicators\n\
             - Mitigation strategies and defensive measures\n\
             - Risk assessment and threat landscape impact"
        ),
        ScenarioType::CampaignInvestigation => format!(
            "Investigate the campaign: {scenario}\n\n\
             Provide comprehensive campaign intelligence including:\n\
             - Campaign details, aliases, and attribution\n\
             - Timeline, evolution, and attack phases\n\
             - Target sectors, organizations, and geographic regions\n\
             - Techniques, tactics, and procedures (TTPs) used\n\
             - Associated threat actor groups and malware\n\
             - Attack vectors and initial access methods\n\
             - Impact assessment and damage evaluation\n\
             - Defensive recommendations and lessons learned"
        ),
        ScenarioType::NavigatorLayerGeneration => format!(
            "Create a comprehensive MITRE ATT&CK Navigator layer analysis for: {scenario}\n\n\
             Provide a detailed analysis report including:\n\
             - Layer purpose and strategic objectives\n\
             - Selected techniques with detailed rationale and scoring\n\
             - Technique categorization by threat level and relevance\n\
             - Real-world examples and use cases for each technique\n\
             - Strategic recommendations and implementation guidance\n\
             - Layer implementation guidance for ATT&CK Navigator\n\
             - Next steps and follow-up actions"
        ),
        ScenarioType::ComparativeAnalysis => format!(
            "Perform comparative analysis of: {scenario}\n\n\
             Provide comprehensive comparative intelligence including:\n\
             - Side-by-side comparison of selected entities\n\
             - Overlapping techniques and common TTPs\n\
             - Unique characteristics and differentiators\n\
             - Similarities and differences in targeting\n\
             - Risk assessment and threat landscape positioning\n\
             - MITRE ATT&CK Navigator layer showing overlaps and differences\n\
             - Strategic recommendations based on comparative analysis"
        ),
    }
}

fn compact_template(scenario_type: ScenarioType, scenario: &str) -> String {
    match scenario_type {
        ScenarioType::ThreatActorProfiling => format!(
            "Analyze TA: {scenario}\n\nProvide: aliases, TTPs (ATT&CK table), malware/tools, \
             campaigns, targets, timeline, defenses, risk eval"
        ),
        ScenarioType::MalwareAnalysis => format!(
            "Analyze malware: {scenario}\n\nProvide: family/variants, capabilities, ATT&CK \
             mapping (table), platforms, linked TAs, detection, defenses, risk eval"
        ),
        ScenarioType::CampaignInvestigation => format!(
            "Investigate campaign: {scenario}\n\nProvide: details/attribution, timeline, \
             targets, TTPs (table), linked TAs/malware, impact, defenses"
        ),
        ScenarioType::NavigatorLayerGeneration => format!(
            "Generate ATT&CK layer: {scenario}\n\nCreate: techniques with scoring, color \
             coding, comments, examples, JSON file, metadata"
        ),
        ScenarioType::ComparativeAnalysis => format!(
            "Compare: {scenario}\n\nProvide: side-by-side comparison, overlapping TTPs, \
             unique characteristics, risk eval, ATT&CK layer, recommendations"
        ),
    }
}

/// Builds the compact prompt: a terse template, rule-compressed, followed
/// by [`GUIDANCE_SUFFIX`].
#[must_use]
pub fn compact_prompt(scenario_type: ScenarioType, scenario: &str) -> String {
    let mut prompt = compress_prompt(&compact_template(scenario_type, scenario));
    prompt.push_str(GUIDANCE_SUFFIX);
    prompt
}

/// Builds a one-line task description.
#[must_use]
pub fn task_summary(scenario_type: ScenarioType, scenario: &str) -> String {
    let verb = match scenario_type {
        ScenarioType::ThreatActorProfiling => "Profile TA group",
        ScenarioType::MalwareAnalysis => "Analyze malware",
        ScenarioType::CampaignInvestigation => "Investigate campaign",
        ScenarioType::NavigatorLayerGeneration => "Generate ATT&CK layer",
        ScenarioType::ComparativeAnalysis => "Compare entities",
    };
    format!("{verb}: {scenario}")
}

/// Returns the compressed description of the expected report.
#[must_use]
pub const fn expected_output(scenario_type: ScenarioType) -> &'static str {
    match scenario_type {
        ScenarioType::ThreatActorProfiling => {
            "TA intel: aliases, TTPs (table), malware/tools, campaigns, targets, timeline, defenses"
        }
        ScenarioType::MalwareAnalysis => {
            "Malware intel: family, capabilities, ATT&CK mapping (table), platforms, TAs, detection, defenses"
        }
        ScenarioType::CampaignInvestigation => {
            "Campaign intel: details, timeline, targets, TTPs (table), TAs/malware, impact, defenses"
        }
        ScenarioType::NavigatorLayerGeneration => {
            "ATT&CK layer JSON: techniques, scoring, colors, comments, examples, metadata"
        }
        ScenarioType::ComparativeAnalysis => {
            "Comparative analysis: side-by-side, overlaps, unique traits, risk eval, ATT&CK layer"
        }
    }
}

/// Builds the relevance query for a scenario.
#[must_use]
pub fn query(scenario_type: ScenarioType, scenario: &str) -> String {
    format!("{scenario_type} {scenario}")
}

/// Reduces the detailed prompt to `max_chars` characters with `reducer`,
/// ranking against [`query`].
#[must_use]
pub fn reduced_prompt(
    scenario_type: ScenarioType,
    scenario: &str,
    reducer: &ContextReducer,
    max_chars: usize,
) -> Reduction {
    let prompt = detailed_prompt(scenario_type, scenario);
    reducer.reduce(&prompt, &query(scenario_type, scenario), max_chars)
}
