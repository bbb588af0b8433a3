use anyhow::Result;
use medchat_application::AppContext;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    ctx.auth.login(email, password).await?;
    match ctx.auth.user().await {
        Some(user) => println!("✅ Signed in as {}", user.full_name.as_deref().unwrap_or(&user.email)),
        None => println!("✅ Signed in"),
    }
    Ok(())
}

pub async fn register(
    ctx: &AppContext,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    ctx.auth.register(email, password, name).await?;
    println!("✅ Account created for {}", email.trim());
    Ok(())
}

pub async fn logout(ctx: &AppContext) {
    ctx.logout().await;
    println!("👋 Signed out");
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    if !ctx.auth.is_authenticated().await {
        println!("Not signed in. Run: medchat login <email> <password>");
        return Ok(());
    }
    match ctx.auth.fetch_me().await.or(ctx.auth.user().await) {
        Some(user) => {
            println!("{}", user.email);
            if let Some(name) = &user.full_name {
                println!("  name: {}", name);
            }
            if let Some(role) = &user.role {
                println!("  role: {}", role);
            }
        }
        None => println!("Signed in, but the profile could not be loaded"),
    }
    Ok(())
}

pub async fn refresh(ctx: &AppContext) -> Result<()> {
    ctx.auth.refresh().await?;
    println!("🔄 Access token refreshed");
    Ok(())
}

pub async fn relogin(ctx: &AppContext) -> Result<()> {
    ctx.auth.relogin().await?;
    println!("🔄 Signed in again");
    Ok(())
}
