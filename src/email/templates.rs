pub fn render_password_reset(token: &str, ttl_minutes: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password Reset Request</h2>
    <p>A password reset was requested for your account.</p>
    <p>Your password reset token is:</p>
    <p style="font-family: monospace; font-size: 16px; background: #f4f4f4; padding: 10px; border-radius: 4px; word-break: break-all;">{token}</p>
    <p style="color: #666; font-size: 14px;">This token will expire in {ttl_minutes} minutes. If you didn't request this, you can ignore it.</p>
</body>
</html>"#
    )
}
