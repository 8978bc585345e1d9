//! Prompt templates for research agents and the judge
//!
//! Research templates carry a `{ticker}` placeholder; each analysis ends with
//! a BULLISH/BEARISH/NEUTRAL stance and a 1-10 confidence so the judge can
//! weigh the three perspectives against each other.

use crate::agents::AgentSpec;
use crate::report::ResearchResults;

/// Financial research brief
pub const FINANCIAL_RESEARCH: &str = r#"You are a financial analysis expert. Conduct a thorough financial analysis of {ticker}.

Your analysis should cover:

1. **Financial Health**:
   - Search for the latest financial statements (balance sheet, income statement, cash flow)
   - Calculate or find key financial ratios: profit margin, ROE, ROA, debt-to-equity
   - Assess liquidity and solvency

2. **Profitability Analysis**:
   - Revenue trends over the past 3-5 years
   - Net income and earnings growth
   - Profit margins compared to industry averages

3. **Valuation Metrics**:
   - P/E ratio, P/S ratio, P/B ratio
   - EV/EBITDA, EV/Sales
   - Compare to sector peers and historical averages

4. **Cash Flow Analysis**:
   - Operating cash flow trends
   - Free cash flow generation
   - Capital expenditure requirements

5. **Balance Sheet Strength**:
   - Debt levels and debt maturity profile
   - Cash reserves and liquidity

**Search Strategy**:
- Use web search to find the latest quarterly and annual reports
- Pull financial data and key ratios from Yahoo Finance
- Look for recent earnings calls and analyst reports

**Output Format**:
Provide a structured analysis with:
- Key financial metrics (with numbers)
- Trend analysis
- Strengths and weaknesses
- Your overall financial perspective: BULLISH, BEARISH, or NEUTRAL
- Confidence level (1-10)
- Specific concerns or red flags

Be data-driven and cite specific numbers. This analysis will be part of a debate with other agents."#;

/// Market and product research brief
pub const MARKET_RESEARCH: &str = r#"You are a market and product analysis expert. Conduct a thorough market analysis of {ticker}.

Your analysis should cover:

1. **Market Position & Size**:
   - Total Addressable Market (TAM) size and growth rate
   - Company's current market share
   - Geographic presence and expansion opportunities

2. **Competitive Landscape**:
   - Key competitors and their market shares
   - Competitive advantages and disadvantages
   - Barriers to entry and competitive threats

3. **Product Analysis**:
   - Core products/services and their differentiation
   - Innovation pipeline and R&D effectiveness
   - Product quality and customer satisfaction

4. **Economic Moat**:
   - Network effects, brand strength, switching costs
   - Cost advantages and intellectual property

5. **Growth Opportunities**:
   - New market opportunities and product expansion potential
   - Industry tailwinds and secular trends

6. **Market Risks**:
   - Competitive pressures, market saturation
   - Technological disruption and regulatory changes

**Search Strategy**:
- Use Exa for deep semantic search on market research and industry reports
- Use Brave Search for recent market news and competitive intelligence

**Output Format**:
Provide a structured analysis with:
- Market size and growth metrics
- Competitive positioning assessment
- Moat analysis (wide/narrow/none)
- Your overall market perspective: BULLISH, BEARISH, or NEUTRAL
- Confidence level (1-10)
- Key opportunities and threats

Be specific and cite sources. This analysis will be part of a debate with other agents."#;

/// Sentiment research brief
pub const SENTIMENT_RESEARCH: &str = r#"You are a sentiment analysis expert. Conduct a thorough sentiment analysis of {ticker}.

Your analysis should cover:

1. **News Sentiment**:
   - Recent news articles (past 30 days)
   - Major news events and their impact
   - Media tone and sentiment trends over time

2. **Analyst Sentiment**:
   - Recent analyst ratings (buy/hold/sell)
   - Rating changes, upgrades/downgrades, price target changes

3. **Social Media & Retail Sentiment**:
   - Social media mentions and trends
   - Retail investor sentiment and community discussions

4. **Management & Insider Activity**:
   - Management reputation and track record
   - Recent insider buying or selling

5. **Market Sentiment Indicators**:
   - Short interest levels and trends
   - Options market sentiment (put/call ratios)
   - Institutional ownership changes

6. **Forward-Looking Sentiment**:
   - Upcoming catalysts (earnings, product launches, etc.)
   - Market expectations vs. reality

**Search Strategy**:
- Use Brave Search for recent news articles and analyst reports
- Use Exa for semantic search of sentiment and opinion pieces
- Use Sonar for live news aggregation and sentiment shifts

**Output Format**:
Provide a structured analysis with:
- Overall sentiment classification (bullish/bearish/neutral)
- News sentiment summary with key headlines
- Analyst consensus and recent changes
- Upcoming catalysts or concerns
- Your overall sentiment perspective: BULLISH, BEARISH, or NEUTRAL
- Confidence level (1-10)

Be comprehensive and cite specific sources. This analysis will be part of a debate with other agents."#;

/// Placeholder injected into the judge prompt for a failed research leg
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";

/// Instruction handed to the finalizing model together with the draft
pub const FINALIZE_VERDICT: &str = "Above is a draft verdict from a first-pass judge. \
Continue its reasoning rather than starting fresh: correct anything unsupported by the research, \
tighten the argument, and produce the FINAL verdict in the same format \
(BUY, HOLD, or SELL with conviction 1-10, key reasoning, main risks, and what to monitor). \
If any research legs were unavailable, say so and lower your conviction accordingly.";

/// Render a research agent prompt for a ticker
pub fn render_research_prompt(spec: &AgentSpec, ticker: &str) -> String {
    spec.prompt_template.replace("{ticker}", ticker)
}

/// Build the judge synthesis prompt from the three research results
///
/// Failed legs contribute an explicit unavailability note (with the captured
/// error) instead of silently disappearing, so the judge knows what evidence
/// it is missing.
pub fn synthesis_prompt(ticker: &str, research: &ResearchResults) -> String {
    let mut prompt = format!(
        "You are the investment judge for {ticker}. Three specialized research agents have \
         analyzed this stock from different perspectives. Weigh their arguments against each \
         other and produce a verdict.\n\n"
    );

    for result in research.iter() {
        prompt.push_str(&format!("## {}\n", result.agent_name));
        if result.is_success() {
            prompt.push_str(&result.analysis);
        } else {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            prompt.push_str(&format!("{ANALYSIS_UNAVAILABLE}: {reason}"));
        }
        prompt.push_str("\n\n");
    }

    prompt.push_str(
        "Produce a draft verdict: BUY, HOLD, or SELL with conviction 1-10, key reasoning \
         (3-5 bullets), main risks, and what to monitor. Be decisive but honest about \
         uncertainty. If research legs were unavailable, reflect that with lower conviction.",
    );

    prompt
}
