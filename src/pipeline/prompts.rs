//! Prompt text for the relevance and summary completions

/// System prompt for picking summary-worthy links
pub const RELEVANCE_SYSTEM_PROMPT: &str = "\
You are provided with a list of links found on a company website. \
Decide which of the links are most relevant for a summary about the company \
aimed at prospective customers, investors and recruits, such as links to an About page, \
a Company page, or Careers/Jobs pages.
You should respond in JSON as in this example:
{
    \"links\": [
        {\"type\": \"about page\", \"url\": \"https://full.url/goes/here/about\"},
        {\"type\": \"careers page\", \"url\": \"https://another.full.url/careers\"}
    ]
}
";

/// System prompt for the company summary
pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You are an assistant that analyzes the contents of several relevant pages from a company website \
and creates a summary about the company for prospective customers, investors and recruits. \
Respond in markdown. \
Include details of company culture, customers and careers/jobs if you have the information.";

/// Placeholder for a link list with nothing in it
pub const NO_LINKS: &str = "No links found";

/// Builds the user prompt listing every discovered link
pub fn relevance_user_prompt(seed_url: &str, links: &[String]) -> String {
    let mut prompt = format!("Here is the list of links on the website of {} - ", seed_url);
    prompt.push_str(
        "please decide which of these are relevant web links for a summary about the company, \
         respond with the full https URL in JSON format. \
         Do not include Terms of Service, Privacy, email links.\n",
    );
    prompt.push_str("Links (some might be relative links):\n");

    if links.is_empty() {
        prompt.push_str(NO_LINKS);
    } else {
        prompt.push_str(&links.join("\n"));
    }

    prompt
}

/// Builds the summary user prompt around the aggregated page content
pub fn summary_user_prompt(company_name: &str, content: &str) -> String {
    format!(
        "You are looking at a company called: {}\n\
         Here are the contents of its landing page and other relevant pages; \
         use this information to build a summary of the company in markdown.\n{}",
        company_name, content
    )
}
