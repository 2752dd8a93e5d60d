//! Built-in UI dictionaries. Every language carries the same key set as `EN`.

pub type Dictionary = &'static [(&'static str, &'static str)];

pub const DEFAULT_LANGUAGE: &str = "en";

pub const LANGUAGES: &[(&str, Dictionary)] = &[
    ("en", EN),
    ("tr", TR),
    ("ru", RU),
    ("fr", FR),
    ("de", DE),
    ("pt", PT),
];

pub const EN: Dictionary = &[
    ("nav.contact", "Contact Info"),
    ("nav.experience", "Experience"),
    ("nav.education", "Education"),
    ("nav.skills", "Skills"),
    ("action.save", "Save"),
    ("action.load", "Load"),
    ("section.personal.title", "Personal Details"),
    ("section.personal.desc", "Your basic contact information."),
    ("label.fullname", "Full Name"),
    ("label.headline", "Headline"),
    ("label.email", "Email"),
    ("label.phone", "Phone"),
    ("label.location", "Location"),
    ("label.website", "Website"),
    ("section.experience.title", "Experience"),
    ("section.experience.desc", "Add your work history."),
    ("action.add_position", "Add Position"),
    ("section.education.title", "Education"),
    ("section.education.desc", "Add your academic background."),
    ("action.add_education", "Add Education"),
    ("section.skills.title", "Skills"),
    ("section.skills.desc", "List your technical skills."),
    ("label.skills_list", "Skills (Comma Separated)"),
    ("label.suggestions", "Suggestions"),
    ("action.download_pdf", "Download PDF"),
];

pub const TR: Dictionary = &[
    ("nav.contact", "İletişim"),
    ("nav.experience", "Deneyim"),
    ("nav.education", "Eğitim"),
    ("nav.skills", "Yetenekler"),
    ("action.save", "Kaydet"),
    ("action.load", "Yükle"),
    ("section.personal.title", "Kişisel Bilgiler"),
    ("section.personal.desc", "Temel iletişim bilgileriniz."),
    ("label.fullname", "Ad Soyad"),
    ("label.headline", "Ünvan"),
    ("label.email", "E-posta"),
    ("label.phone", "Telefon"),
    ("label.location", "Konum"),
    ("label.website", "Web Sitesi"),
    ("section.experience.title", "İş Deneyimi"),
    ("section.experience.desc", "Çalışma geçmişinizi ekleyin."),
    ("action.add_position", "Pozisyon Ekle"),
    ("section.education.title", "Eğitim"),
    ("section.education.desc", "Akademik geçmişinizi ekleyin."),
    ("action.add_education", "Okul Ekle"),
    ("section.skills.title", "Yetenekler"),
    ("section.skills.desc", "Teknik yeteneklerinizi listeleyin."),
    ("label.skills_list", "Yetenekler (Virgülle ayırın)"),
    ("label.suggestions", "Öneriler"),
    ("action.download_pdf", "PDF İndir"),
];

pub const RU: Dictionary = &[
    ("nav.contact", "Контакты"),
    ("nav.experience", "Опыт"),
    ("nav.education", "Образование"),
    ("nav.skills", "Навыки"),
    ("action.save", "Сохранить"),
    ("action.load", "Загрузить"),
    ("section.personal.title", "Личные Данные"),
    ("section.personal.desc", "Ваша контактная информация."),
    ("label.fullname", "ФИО"),
    ("label.headline", "Должность"),
    ("label.email", "Email"),
    ("label.phone", "Телефон"),
    ("label.location", "Адрес"),
    ("label.website", "Вебсайт"),
    ("section.experience.title", "Опыт Работы"),
    ("section.experience.desc", "Добавьте историю работы."),
    ("action.add_position", "Добавить Позицию"),
    ("section.education.title", "Образование"),
    ("section.education.desc", "Добавьте учебные заведения."),
    ("action.add_education", "Добавить Образование"),
    ("section.skills.title", "Навыки"),
    ("section.skills.desc", "Перечислите ваши навыки."),
    ("label.skills_list", "Навыки (через запятую)"),
    ("label.suggestions", "Предложения"),
    ("action.download_pdf", "Скачать PDF"),
];

pub const FR: Dictionary = &[
    ("nav.contact", "Contact"),
    ("nav.experience", "Expérience"),
    ("nav.education", "Éducation"),
    ("nav.skills", "Compétences"),
    ("action.save", "Sauvegarder"),
    ("action.load", "Charger"),
    ("section.personal.title", "Détails personnels"),
    ("section.personal.desc", "Vos coordonnées de base."),
    ("label.fullname", "Nom complet"),
    ("label.headline", "Titre"),
    ("label.email", "Email"),
    ("label.phone", "Téléphone"),
    ("label.location", "Adresse"),
    ("label.website", "Site web"),
    ("section.experience.title", "Expérience"),
    ("section.experience.desc", "Ajoutez votre historique professionnel."),
    ("action.add_position", "Ajouter un poste"),
    ("section.education.title", "Éducation"),
    ("section.education.desc", "Ajoutez votre parcours académique."),
    ("action.add_education", "Ajouter une formation"),
    ("section.skills.title", "Compétences"),
    ("section.skills.desc", "Listez vos compétences techniques."),
    ("label.skills_list", "Compétences (séparées par des virgules)"),
    ("label.suggestions", "Suggestions"),
    ("action.download_pdf", "Télécharger PDF"),
];

pub const DE: Dictionary = &[
    ("nav.contact", "Kontakt"),
    ("nav.experience", "Erfahrung"),
    ("nav.education", "Ausbildung"),
    ("nav.skills", "Fähigkeiten"),
    ("action.save", "Speichern"),
    ("action.load", "Laden"),
    ("section.personal.title", "Persönliche Daten"),
    ("section.personal.desc", "Ihre grundlegenden Kontaktinformationen."),
    ("label.fullname", "Vollständiger Name"),
    ("label.headline", "Titel"),
    ("label.email", "E-Mail"),
    ("label.phone", "Telefon"),
    ("label.location", "Ort"),
    ("label.website", "Webseite"),
    ("section.experience.title", "Berufserfahrung"),
    ("section.experience.desc", "Fügen Sie Ihren beruflichen Werdegang hinzu."),
    ("action.add_position", "Position hinzufügen"),
    ("section.education.title", "Ausbildung"),
    ("section.education.desc", "Fügen Sie Ihren akademischen Hintergrund hinzu."),
    ("action.add_education", "Ausbildung hinzufügen"),
    ("section.skills.title", "Fähigkeiten"),
    ("section.skills.desc", "Listen Sie Ihre technischen Fähigkeiten auf."),
    ("label.skills_list", "Fähigkeiten (kommagetrennt)"),
    ("label.suggestions", "Vorschläge"),
    ("action.download_pdf", "PDF herunterladen"),
];

pub const PT: Dictionary = &[
    ("nav.contact", "Contato"),
    ("nav.experience", "Experiência"),
    ("nav.education", "Educação"),
    ("nav.skills", "Habilidades"),
    ("action.save", "Salvar"),
    ("action.load", "Carregar"),
    ("section.personal.title", "Dados Pessoais"),
    ("section.personal.desc", "Suas informações básicas de contato."),
    ("label.fullname", "Nome Completo"),
    ("label.headline", "Título"),
    ("label.email", "E-mail"),
    ("label.phone", "Telefone"),
    ("label.location", "Localização"),
    ("label.website", "Site"),
    ("section.experience.title", "Experiência"),
    ("section.experience.desc", "Adicione seu histórico profissional."),
    ("action.add_position", "Adicionar Posição"),
    ("section.education.title", "Educação"),
    ("section.education.desc", "Adicione sua formação acadêmica."),
    ("action.add_education", "Adicionar Formação"),
    ("section.skills.title", "Habilidades"),
    ("section.skills.desc", "Liste suas habilidades técnicas."),
    ("label.skills_list", "Habilidades (separadas por vírgula)"),
    ("label.suggestions", "Sugestões"),
    ("action.download_pdf", "Baixar PDF"),
];
