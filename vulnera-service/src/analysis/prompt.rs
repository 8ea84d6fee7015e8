use vulnera_flow::AssessmentRequest;

/// Addressee used in the prompt when no contact details are attached
pub const GENERIC_ADDRESSEE: &str = "l'utilisateur";

/// Canonical follow-up sentence the model is instructed to return verbatim
/// in the `invitation` field. Advisory only, never enforced post-hoc.
pub const INVITATION_SENTENCE: &str = "Un membre de l'équipe vous contactera dans le prochain jour pour discuter de stratégies pour optimiser votre situation sans frais.";

/// System-role text sent with every assessment request
pub const ANALYST_PREAMBLE: &str = r#"Agis comme un analyste en vulnérabilité financière et expert en planification de retraite pour des particuliers au Canada.

INSTRUCTION CRITIQUE POUR L'INVITATION :
L'invitation doit obligatoirement être exactement la suivante : "Un membre de l'équipe vous contactera dans le prochain jour pour discuter de stratégies pour optimiser votre situation sans frais."

Contraintes :
- Score 0 (solide) à 100 (vulnérable).
- Zones: Green (faible), Yellow (modérée), Red (élevée).
- Jamais de noms de banques ou de placements précis.
- Style professionnel, direct et bienveillant.
- Langue : Français canadien.
- Réponds uniquement avec un objet JSON conforme au schéma demandé, sans texte additionnel."#;

/// Build the per-request prompt block.
///
/// Deterministic, pure function of the request: every questionnaire field
/// is injected verbatim into a labeled block, and the contact first name
/// personalizes the mission when present.
pub fn build_assessment_prompt(request: &AssessmentRequest) -> String {
    let answers = &request.answers;
    let first_name = request
        .contact
        .as_ref()
        .map(|contact| contact.first_name.as_str())
        .unwrap_or(GENERIC_ADDRESSEE);

    let name_context = match &request.contact {
        Some(contact) => format!("Le participant s'appelle {}.\n\n", contact.first_name),
        None => String::new(),
    };

    format!(
        r#"{name_context}Données du participant :
- Âge actuel: {age} ans
- Revenu: {income}
- Emploi: {employment}
- Fonds d'urgence: {emergency_fund}
- Dettes: {debt}
- Logement: {housing}
- Personnes à charge: {dependents}
- Couverture d'assurance: {insurance}
- Contexte additionnel: {context}

DONNÉES RETRAITE :
- Épargne actuelle cumulée: {savings}
- Âge visé de retraite: {age_goal} ans
- Taux d'épargne mensuel: {contribution}

MISSION :
1. Évaluer la vulnérabilité globale actuelle.
2. Analyser spécifiquement la "Préparation à la Retraite" : est-ce que le rythme actuel et l'épargne accumulée permettront d'atteindre l'objectif de {age_goal} ans sans précarité ?
3. Dans le "summary", commence par t'adresser à {first_name}. Inclus une section claire sur sa préparation à la retraite (en retard, sur la bonne voie, ou précaire)."#,
        name_context = name_context,
        age = answers.age,
        income = answers.income_range,
        employment = answers.employment_status,
        emergency_fund = answers.emergency_fund,
        debt = answers.debt_level,
        housing = answers.housing_cost,
        dependents = answers.dependents,
        insurance = answers.insurance_coverage,
        context = answers.additional_context,
        savings = answers.retirement_savings,
        age_goal = answers.retirement_age_goal,
        contribution = answers.retirement_contribution,
        first_name = first_name,
    )
}
