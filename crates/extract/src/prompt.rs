/// System message for every extraction call.
pub const SYSTEM_PROMPT: &str =
    "You extract business relations and industry classification from financial reports.";

/// Build the extraction prompt for one company's bounded report text.
/// Pure function: same inputs always produce the same prompt, so the
/// request layer is testable without any model.
pub fn build_extraction_prompt(company_name: &str, bounded_text: &str) -> String {
    format!(
        r#"You are an AI assistant specializing in analyzing financial and business reports.
The text provided below is a **pre-downloaded offline business report**.
You must ONLY use the given text to extract information.
Do NOT try to browse the internet or assume you lack access to the data.
This is NOT real-time fetching — all necessary information is already included.

Your task is to extract **clear and specific company names** related to the target company's supply chain and industry classification.
Accuracy is critical for investment and value chain analysis.

Extract in the exact JSON format:
{{
  "industry": "Main industry sector of the target company",
  "suppliers": [{{"category": "Raw material or service category", "company": "Exact name of supplier company"}}],
  "buyers": [{{"category": "Product or service type", "company": "Exact name of buyer company"}}]
}}

Rules:
- Do NOT include vague or group-like terms such as "various companies", "multiple clients", "domestic manufacturers", "불명", "협력업체", or anything similar.
- Only include **real, specific, and identifiable company names** like "Samsung Electronics", "SK hynix", etc.
- If the company name is not explicitly mentioned or is unclear, **exclude that entry entirely** from the output.
- Maintain the **original language** of the source content (Korean if written in Korean, English if written in English).
- Ensure that each entry for 'suppliers' and 'buyers' includes only **one company per category per line** to maintain clarity and precision in data extraction.
- **If multiple company names are separated by commas or "등", extract each of them as a separate entry**, even if they appear in the same sentence or cell.

Example Output:
{{
  "industry": "철강",
  "suppliers": [
    {{"category": "원재료", "company": "POSCO"}}
  ],
  "buyers": [
    {{"category": "자동차 부품", "company": "현대모비스"}}
  ]
}}

{{
  "industry": "반도체",
  "suppliers": [
    {{"category": "웨이퍼", "company": "SK실트론"}},
    {{"category": "포토레지스트", "company": "동진쎄미켐"}}
  ],
  "buyers": [
    {{"category": "반도체", "company": "삼성전자"}},
    {{"category": "반도체", "company": "TSMC"}}
  ]
}}

Now analyze the following offline business report for: {company_name}

{bounded_text}"#
    )
}
