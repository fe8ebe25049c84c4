// Standard Swedish clause texts for security and alarm system agreements.
//
// Each section starts with a header line (`§<n> TITLE`), followed by a blank
// line and the body. Body lines become layout blocks one by one:
// `N.N Title` lines are sub-clause headings, `•` lines are bullets.
// Placeholders in `{braces}` are bound by the composer.

pub const AGREEMENT_TITLE: &str = "AFFÄRSAVTAL";
pub const AGREEMENT_SUBTITLE: &str = "Säkerhets- och larmsystem";

pub const INTRODUCTION: &str = "\
Detta avtal reglerar leverans, installation och underhåll av säkerhets- och larmsystem \
mellan {company_name} (nedan kallad \"Leverantören\") och {customer_name} \
(nedan kallad \"Kunden\").";

pub const SCOPE_SECTION: &str = "\
§1 AVTALETS OMFATTNING

Detta avtal omfattar leverans, installation, driftsättning och underhåll av säkerhets- och \
larmutrustning enligt specifikationen ovan. Leveransen inkluderar:
• Säkerhets- och larmutrustning enligt specifikation
• Installation och driftsättning av utrustning
• Användarkurs och dokumentation
• Garantiservice enligt § 5
• Teknisk support enligt § 6";

pub const DELIVERY_SECTION: &str = "\
§2 LEVERANS OCH INSTALLATION

2.1 Leveranstid
Leveransen påbörjas inom 14 arbetsdagar från avtalsundertecknande. Installation och \
driftsättning ska vara slutförd senast {installation_date}.

2.2 Installation
Leverantören ansvarar för professionell installation av all utrustning. Kunden ska \
tillhandahålla nödvändig tillgång till lokaler och erforderlig infrastruktur \
(t.ex. eluttag, nätverksanslutning).

2.3 Driftsättning och genomgång
Efter färdigställd installation genomförs testning och driftsättning tillsammans med kunden. \
Användarkurs och genomgång av systemet ingår.";

pub const PAYMENT_SECTION: &str = "\
§3 BETALNINGSVILLKOR

3.1 Totalt belopp
Total kostnad enligt detta avtal uppgår till {total_amount} exkl. moms. Moms tillkommer \
enligt gällande lagstiftning (f.n. {tax_percent}).

3.2 Betalningsplan
{payment_plan}

3.3 Betalningsvillkor
Faktura ska betalas inom 30 dagar netto från fakturadatum. Vid försenad betalning utgår \
dröjsmålsränta enligt räntelagen.

3.4 Äganderätt
Levererad utrustning förblir Leverantörens egendom till dess full betalning erlagts av Kunden.";

pub const CONTRACT_PERIOD_SECTION: &str = "\
§4 AVTALSTID OCH UPPSÄGNING

4.1 Avtalstid
Detta avtal gäller från {contract_start_date} till {contract_end_date} ({contract_period}).

4.2 Förlängning
Avtalet förlängs automatiskt med 12 månader i taget om det inte sägs upp av någon part \
senast 3 månader före avtalstidens utgång.

4.3 Uppsägning
Uppsägning ska ske skriftligen till motparten. Vid uppsägning i förtid kan Leverantören \
debitera administrativa kostnader samt eventuella avskrivningskostnader för installerad \
utrustning.";

pub const WARRANTY_SECTION: &str = "\
§5 GARANTI OCH ANSVAR

5.1 Garanti
Leverantören garanterar att levererad utrustning är fri från material- och fabrikationsfel \
under en period av {warranty_period} från leveransdatum. Under garantitiden åtgärdas fel \
och brister utan kostnad för Kunden.

5.2 Garantins omfattning
Garantin omfattar inte:
• Skador orsakade av felaktig hantering eller vårdslöshet
• Skador från yttre påverkan (blixtnedslag, översvämning, brand m.m.)
• Obehöriga ändringar eller reparationer
• Normalt slitage och förbrukningsartiklar

5.3 Ansvarsbegränsning
Leverantörens ansvar är begränsat till direkta skador på utrustningen. Leverantören \
ansvarar inte för följdskador eller indirekta förluster.";

pub const SUPPORT_SECTION: &str = "\
§6 SUPPORT OCH UNDERHÅLL

6.1 Teknisk support
Leverantören tillhandahåller teknisk support via telefon och e-post. \
Telefon: {company_phone}, e-post: {company_email}.

6.2 Underhåll och service
Årlig service och funktionskontroll rekommenderas och kan beställas separat. Akut service \
utanför ordinarie arbetstid debiteras enligt gällande prislista.

6.3 Reservdelar
Reservdelar tillhandahålls enligt tillverkarens anvisningar och produktlivscykel. För \
utgångna produkter tillhandahålls motsvarande ersättningsprodukter.

6.4 Servicenivå
{service_level}";

pub const CHANGES_SECTION: &str = "\
§7 ÄNDRINGAR OCH TILLÄGG

7.1 Ändringar av avtalet
Ändringar och tillägg till detta avtal ska göras skriftligen och undertecknas av båda \
parter för att vara giltiga.

7.2 Utökning av system
Om Kunden önskar utöka systemet med ytterligare komponenter upprättas tilläggsavtal med \
specifikation och priser.";

pub const FORCE_MAJEURE_SECTION: &str = "\
§8 FORCE MAJEURE

Ingen av parterna är ansvarig för dröjsmål eller utebliven leverans till följd av \
omständigheter som parten inte kunnat råda över, såsom krig, naturkatastrof, brand, strejk, \
lockout, myndighetsbeslut eller annan liknande omständighet.";

pub const CONFIDENTIALITY_SECTION: &str = "\
§9 SEKRETESS

Båda parter förbinder sig att behandla all information som utbyts i samband med detta \
avtal konfidentiellt. Sekretessen gäller även efter avtalets upphörande.";

pub const DISPUTES_SECTION: &str = "\
§10 TVISTER

Tvist i anledning av detta avtal ska i första hand lösas genom förhandling mellan parterna. \
Om överenskommelse inte kan nås ska tvisten avgöras enligt svensk lag vid svensk domstol.";

pub const SPECIAL_TERMS_SECTION: &str = "\
§11 SÄRSKILDA VILLKOR

{special_terms}";

/// Sections printed in every agreement, in order. `SPECIAL_TERMS_SECTION`
/// follows when the request carries special terms.
pub const STANDARD_SECTIONS: [&str; 10] = [
    SCOPE_SECTION,
    DELIVERY_SECTION,
    PAYMENT_SECTION,
    CONTRACT_PERIOD_SECTION,
    WARRANTY_SECTION,
    SUPPORT_SECTION,
    CHANGES_SECTION,
    FORCE_MAJEURE_SECTION,
    CONFIDENTIALITY_SECTION,
    DISPUTES_SECTION,
];

pub const SIGNATURES_SECTION: &str = "\
UNDERSKRIFTER

Detta avtal har upprättats i två exemplar varav parterna tagit var sitt.
Datum: {contract_date}";

// ── Quote ──

pub const QUOTE_TITLE: &str = "OFFERT";

/// Used when the request carries no `terms` override.
pub const QUOTE_STANDARD_TERMS: &str = "\
Denna offert är giltig i {validity_days} dagar från offertdatum. Priser är angivna i svenska \
kronor exklusive moms där annat inte anges.

• Betalningsvillkor: 30 dagar netto
• Leveransvillkor: Enligt överenskommelse
• Garanti: 12 månader från leverans

Installation och service utförs av behöriga tekniker. Alla produkter uppfyller gällande \
säkerhetsstandarder.
Vid accept av denna offert vänligen signera och returnera en kopia.";
