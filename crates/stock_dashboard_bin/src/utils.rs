pub fn sanitize_ticker(ticker: String) -> String {
    return ticker
        .trim()
        .chars()
        .take(20)
        .filter(|c| c.is_alphanumeric() || matches!(*c, '-' | '_' | '.' | '^' | '='))
        .collect::<String>()
        .to_uppercase();
}
