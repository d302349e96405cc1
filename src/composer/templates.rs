//! Compiled-in message templates.
//!
//! Several wordings exist per message kind so consecutive dispatches do not
//! look identical to WhatsApp's spam heuristics.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::MessageKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub text: &'static str,
}

pub const MEETING_TEMPLATES: &[Template] = &[
    Template {
        id: "v1",
        name: "Versão 1 – Padrão",
        text: "Olá *{{clientName}}*, me chamo *{{agentName}}* da Videoconferência do Grupo ASCEL.

📅 Atendimento: {{dynamicDate}} às {{time}} (horário de Brasília)

🔗 Link de acesso:
{{link}}

👉 Clique em \"prosseguir\" e informe o código enviado por SMS e e-mail.

📌 Importante:
• Local silencioso
• Fundo neutro obrigatório
• Tolerância de atraso: 8 minutos

Confirma nosso atendimento?",
    },
    Template {
        id: "v2",
        name: "Versão 2 – Lista Numerada",
        text: "Olá *{{clientName}}*, aqui é *{{agentName}}* da equipe de Videoconferência do Grupo ASCEL 😊

1️⃣ Atendimento marcado para {{dynamicDate}} às {{time}} (horário de Brasília)

2️⃣ Para acessar a reunião:
{{link}}

→ Clique em \"prosseguir\" e informe o código recebido por SMS e e-mail

3️⃣ Antes do atendimento, atenção:
✔ Local silencioso
✔ Fundo neutro obrigatório
✔ Tolerância de atraso: 8 minutos

Podemos confirmar sua presença?",
    },
    Template {
        id: "v3",
        name: "Versão 3 – Compacto",
        text: "Olá *{{clientName}}*, me chamo *{{agentName}}* da Videoconferência do Grupo ASCEL.

📅 Atendimento: {{dynamicDate}} às {{time}} (horário de Brasília)

🔗 Link de acesso:
{{link}}

👉 Clique em \"prosseguir\" e informe o código enviado por SMS e e-mail.

📌 Importante:
• Local silencioso
• Fundo neutro obrigatório
• Tolerância de atraso: 8 minutos

Confirma nosso atendimento?",
    },
    Template {
        id: "v4",
        name: "Versão 4 – Separadores",
        text: "Olá *{{clientName}}*, aqui é *{{agentName}}* da equipe de Videoconferência do Grupo ASCEL.

────────────
📅 *Horário do atendimento*
{{dynamicDate}} às {{time}} (horário de Brasília)
────────────

🔗 *Link da reunião*
{{link}}

👉 Clique em \"prosseguir\" e informe o código enviado por SMS e e-mail.

📌 *Orientações*
• Ambiente silencioso
• Fundo neutro (parede lisa)
• Tolerância de atraso: 8 minutos

Podemos confirmar?",
    },
    Template {
        id: "v5",
        name: "Versão 5 – Pergunta e Resposta",
        text: "Olá *{{clientName}}*, sou *{{agentName}}* e serei responsável por realizar a sua Videoconferência.

❓ *Quando é o atendimento?*
📅 {{dynamicDate}} às {{time}} (horário de Brasília)

❓ *Como acessar?*
🔗 {{link}}

👉 Clique em \"prosseguir\" e use o código enviado por SMS e e-mail.

❗ *Atenção:*
• Local silencioso
• Fundo neutro obrigatório
• Tolerância de atraso: 8 minutos

Podemos confirmar o atendimento?",
    },
    Template {
        id: "v6",
        name: "Versão 6 – Visual (com Nome)",
        text: "Olá *{{clientName}}*, sou *{{agentName}}* agente de vídeo conferência responsável pelo seu atendimento.

📞 *Videoconferência | Grupo ASCEL*
🕒 {{dynamicDate}} às {{time}} (horário de Brasília)

🔗 *Acesso*
{{link}}

👉 Clique em \"prosseguir\"
👉 Informe o código recebido por SMS e e-mail

📌 *Para um atendimento tranquilo:*
✔ Local silencioso
✔ Fundo neutro (parede lisa)
✔ Atraso permitido: até 8 minutos

Confirma o atendimento?",
    },
    Template {
        id: "v7",
        name: "Versão 7 – Direto",
        text: "Olá *{{clientName}}*, meu nome é *{{agentName}}*, sou da equipe de Videoconferência do Grupo ASCEL.

📅 Atendimento agendado para {{dynamicDate}} às {{time}} (horário de Brasília).

🔗 Acesse pelo link:
{{link}}

👉 Clique em \"prosseguir\" e informe o código enviado por SMS e e-mail.

📌 Requisitos:
• Local silencioso
• Fundo neutro obrigatório
• Tolerância de atraso: 8 minutos

Podemos confirmar?",
    },
    Template {
        id: "v8",
        name: "Versão 8 – Destaque",
        text: "Olá *{{clientName}}*, aqui é *{{agentName}}* da equipe de Videoconferência do Grupo ASCEL.

⭐ *Atendimento de {{dynamicDate}}*
🕒 {{time}} (horário de Brasília)

🔗 *Link da reunião*
{{link}}

👉 Selecione \"prosseguir\"
👉 Informe o código enviado por SMS e e-mail

📌 *Atenção*
• Ambiente silencioso
• Fundo neutro (parede lisa) obrigatório
• Tolerância de atraso: 8 minutos

Podemos confirmar nosso atendimento?",
    },
];

pub const CERTIFICATE_TEMPLATES: &[Template] = &[
    Template {
        id: "c1",
        name: "Modelo 1 – Padrão",
        text: "🎉 *PARABÉNS *{{clientName}}*!*
Seu certificado foi APROVADO ✅
{{a1Warning}}

🔗 Link para emissão do certificado:
{{link}}

📄 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Agradecemos a confiança 🚀
*{{agentName}}* - Grupo ASCEL",
    },
    Template {
        id: "c2",
        name: "Modelo 2 – Curto",
        text: "✅ Certificado aprovado com sucesso!

Olá *{{clientName}}*,
{{a1Warning}}

➡️ Emissão do certificado:
{{link}}

➡️ Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Obrigado pela confiança 🚀
Att, *{{agentName}}*",
    },
    Template {
        id: "c3",
        name: "Modelo 3 – Visual",
        text: "🎉 Parabéns *{{clientName}}*! Seu certificado foi aprovado ✅
{{a1Warning}}

🔗 Acesse para emitir:
{{link}}

📌 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Agradecemos a confiança 🚀
*{{agentName}}*",
    },
    Template {
        id: "c4",
        name: "Modelo 4 – Separadores",
        text: "🎊 *CERTIFICADO APROVADO* ✅

───────────────
Olá *{{clientName}}*,
{{a1Warning}}
───────────────

🔗 Link de emissão:
{{link}}

📄 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Obrigado por confiar em nosso serviço 🚀
Atenciosamente, *{{agentName}}*",
    },
    Template {
        id: "c5",
        name: "Modelo 5 – Passos",
        text: "🎉 Parabéns *{{clientName}}*! Seu certificado foi aprovado ✅
{{a1Warning}}

📌 *Como emitir:*
1️⃣ Acesse o link abaixo
2️⃣ Utilize o protocolo informado
3️⃣ Use o código de emissão

🔗 {{link}}

📄 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Agradecemos a confiança 🚀
*{{agentName}}*",
    },
    Template {
        id: "c6",
        name: "Modelo 6 – Objetivo",
        text: "✅ Seu certificado foi aprovado com sucesso!

Olá *{{clientName}}*,
{{a1Warning}}

🔗 Link de acesso:
{{link}}

📌 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Obrigado pela confiança 🚀
Att, *{{agentName}}*",
    },
    Template {
        id: "c7",
        name: "Modelo 7 – Acolhedor",
        text: "Olá *{{clientName}}*! 😊

Temos uma ótima notícia:
🎉 Seu certificado foi APROVADO ✅
{{a1Warning}}

🔗 Emissão do certificado:
{{link}}

📄 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Agradecemos a confiança 🚀
Com carinho, *{{agentName}}*",
    },
    Template {
        id: "c8",
        name: "Modelo 8 – Destaque",
        text: "⭐ *PARABÉNS *{{clientName}}*!*
Seu certificado foi APROVADO ✅
{{a1Warning}}

🔗 Link de emissão:
{{link}}

📌 Protocolo: {{protocol}}

🔑 Código de Emissão: {{emissionCode}}
{{feedbackSection}}

Obrigado pela confiança 🚀
*{{agentName}}* - Atendimento",
    },
];

pub fn templates_for(kind: MessageKind) -> &'static [Template] {
    match kind {
        MessageKind::Meeting => MEETING_TEMPLATES,
        MessageKind::Certificate => CERTIFICATE_TEMPLATES,
    }
}

pub fn find_template(kind: MessageKind, id: &str) -> Option<&'static Template> {
    templates_for(kind).iter().find(|t| t.id == id)
}

/// Uniform choice among the templates of `kind` only
pub fn pick_random<R: Rng + ?Sized>(kind: MessageKind, rng: &mut R) -> &'static Template {
    let templates = templates_for(kind);
    // Both catalogs are non-empty constants
    templates.choose(rng).unwrap_or(&templates[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn catalogs_have_unique_ids_per_kind() {
        for kind in [MessageKind::Meeting, MessageKind::Certificate] {
            let ids: HashSet<_> = templates_for(kind).iter().map(|t| t.id).collect();
            assert_eq!(ids.len(), templates_for(kind).len());
            assert_eq!(ids.len(), 8);
        }
    }

    #[test]
    fn every_template_carries_client_and_link_tokens() {
        for template in MEETING_TEMPLATES.iter().chain(CERTIFICATE_TEMPLATES) {
            assert!(template.text.contains("{{clientName}}"), "{}", template.id);
            assert!(template.text.contains("{{link}}"), "{}", template.id);
        }
    }

    #[test]
    fn random_pick_stays_within_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(pick_random(MessageKind::Meeting, &mut rng).id.starts_with('v'));
            assert!(pick_random(MessageKind::Certificate, &mut rng).id.starts_with('c'));
        }
    }

    #[test]
    fn random_pick_reaches_every_template() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..500)
            .map(|_| pick_random(MessageKind::Certificate, &mut rng).id)
            .collect();
        assert_eq!(seen.len(), CERTIFICATE_TEMPLATES.len());
    }

    #[test]
    fn lookup_by_id_respects_kind() {
        assert!(find_template(MessageKind::Meeting, "v4").is_some());
        assert!(find_template(MessageKind::Meeting, "c4").is_none());
        assert_eq!(find_template(MessageKind::Certificate, "c2").map(|t| t.name), Some("Modelo 2 – Curto"));
    }
}
