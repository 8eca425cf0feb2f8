//! Static display metadata and storage binding for each document type.
//!
//! `document_info` is an exhaustive match over `DocumentType`: adding a variant
//! does not compile until it has an entry here (and a projection arm in
//! `verification::record`).

use serde::{Deserialize, Serialize};

use crate::reference::document_type::DocumentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
    Es,
}

/// A string available in every supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: &'static str,
    pub fr: &'static str,
    pub es: &'static str,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Fr => self.fr,
            Locale::Es => self.es,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeInfo {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub names: LocalizedText,
    pub descriptions: LocalizedText,
    /// Table holding documents of this type.
    pub model_name: &'static str,
    /// Column holding the reference ID within `model_name`.
    pub field_name: &'static str,
}

static MEMBER: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::Member,
    names: LocalizedText {
        en: "Member Card",
        fr: "Carte de membre",
        es: "Tarjeta de miembro",
    },
    descriptions: LocalizedText {
        en: "Proof of membership in the coaching program",
        fr: "Preuve d'adhésion au programme d'accompagnement",
        es: "Prueba de pertenencia al programa de coaching",
    },
    model_name: "members",
    field_name: "member_ref",
};

static CERTIFICATE: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::Certificate,
    names: LocalizedText {
        en: "Certificate",
        fr: "Certificat",
        es: "Certificado",
    },
    descriptions: LocalizedText {
        en: "Certificate of completion for a coaching track",
        fr: "Certificat de réussite d'un parcours d'accompagnement",
        es: "Certificado de finalización de un programa de coaching",
    },
    model_name: "certificates",
    field_name: "certificate_ref",
};

static RECOMMENDATION: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::Recommendation,
    names: LocalizedText {
        en: "Recommendation Letter",
        fr: "Lettre de recommandation",
        es: "Carta de recomendación",
    },
    descriptions: LocalizedText {
        en: "Recommendation issued by a coach or mentor",
        fr: "Recommandation émise par un coach ou un mentor",
        es: "Recomendación emitida por un coach o mentor",
    },
    model_name: "recommendations",
    field_name: "recommendation_ref",
};

static PERFORMANCE_PROFILE: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::PerformanceProfile,
    names: LocalizedText {
        en: "Performance Profile",
        fr: "Profil de performance",
        es: "Perfil de rendimiento",
    },
    descriptions: LocalizedText {
        en: "Assessment of professional strengths and measured performance",
        fr: "Évaluation des forces professionnelles et des performances mesurées",
        es: "Evaluación de fortalezas profesionales y rendimiento medido",
    },
    model_name: "performance_profiles",
    field_name: "profile_ref",
};

static ROLE_ALIGNMENT: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::RoleAlignment,
    names: LocalizedText {
        en: "Role Alignment Report",
        fr: "Rapport d'alignement de poste",
        es: "Informe de alineación de puesto",
    },
    descriptions: LocalizedText {
        en: "Fit analysis between a profile and a target role",
        fr: "Analyse d'adéquation entre un profil et un poste cible",
        es: "Análisis de ajuste entre un perfil y un puesto objetivo",
    },
    model_name: "role_alignments",
    field_name: "alignment_ref",
};

static CAREER_DIAGNOSIS: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::CareerDiagnosis,
    names: LocalizedText {
        en: "Career Diagnosis",
        fr: "Diagnostic de carrière",
        es: "Diagnóstico de carrera",
    },
    descriptions: LocalizedText {
        en: "Structured diagnosis of career position and next steps",
        fr: "Diagnostic structuré de la situation de carrière et des prochaines étapes",
        es: "Diagnóstico estructurado de la situación profesional y próximos pasos",
    },
    model_name: "career_diagnoses",
    field_name: "diagnosis_ref",
};

static SIMULATION_SCORECARD: DocumentTypeInfo = DocumentTypeInfo {
    doc_type: DocumentType::SimulationScorecard,
    names: LocalizedText {
        en: "Interview Simulation Scorecard",
        fr: "Fiche d'évaluation de simulation d'entretien",
        es: "Ficha de evaluación de simulación de entrevista",
    },
    descriptions: LocalizedText {
        en: "Scored results of an interview simulation",
        fr: "Résultats notés d'une simulation d'entretien",
        es: "Resultados puntuados de una simulación de entrevista",
    },
    model_name: "simulation_scorecards",
    field_name: "scorecard_ref",
};

/// Returns the registry entry for a document type.
pub fn document_info(doc_type: DocumentType) -> &'static DocumentTypeInfo {
    match doc_type {
        DocumentType::Member => &MEMBER,
        DocumentType::Certificate => &CERTIFICATE,
        DocumentType::Recommendation => &RECOMMENDATION,
        DocumentType::PerformanceProfile => &PERFORMANCE_PROFILE,
        DocumentType::RoleAlignment => &ROLE_ALIGNMENT,
        DocumentType::CareerDiagnosis => &CAREER_DIAGNOSIS,
        DocumentType::SimulationScorecard => &SIMULATION_SCORECARD,
    }
}

/// Every registry entry, in `DocumentType::ALL` order.
pub fn all_document_types() -> Vec<&'static DocumentTypeInfo> {
    DocumentType::ALL.into_iter().map(document_info).collect()
}
