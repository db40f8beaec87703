mod analyze_text;
mod health_check;
mod startup;
mod welcome;
